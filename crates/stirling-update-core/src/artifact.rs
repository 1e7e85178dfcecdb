use crate::types::{ClientOs, MachineProfile, MachineType};

pub const SERVER_JAR: &str = "Stirling-PDF.jar";
pub const SERVER_JAR_WITH_LOGIN: &str = "Stirling-PDF-with-login.jar";

/// File name of the installable artifact for a machine profile.
///
/// Returns `None` for container deployments and for machine types without a
/// direct download.
#[must_use]
pub fn artifact_name(profile: &MachineProfile) -> Option<String> {
    let kind = profile.kind();
    if kind.is_managed() {
        return None;
    }
    let name = match kind {
        MachineType::ServerJar => {
            if profile.active_security {
                SERVER_JAR_WITH_LOGIN.to_string()
            } else {
                SERVER_JAR.to_string()
            }
        }
        MachineType::Client(ClientOs::Unix) => {
            let flavor = if profile.active_security {
                "-server-security"
            } else {
                "-server"
            };
            format!("unix{flavor}.jar")
        }
        MachineType::Client(ClientOs::Windows) => "win-installer.exe".to_string(),
        MachineType::Client(ClientOs::Mac) => "mac-installer.dmg".to_string(),
        MachineType::Docker
        | MachineType::Kubernetes
        | MachineType::Client(ClientOs::Other(_))
        | MachineType::Other(_) => return None,
    };
    Some(name)
}

/// Resolve the download URL for a machine profile against `base_url`.
///
/// The artifact name is appended verbatim, so `base_url` is expected to end
/// with a path separator.
#[must_use]
pub fn resolve_download_url(profile: &MachineProfile, base_url: &str) -> Option<String> {
    artifact_name(profile).map(|name| format!("{base_url}{name}"))
}
