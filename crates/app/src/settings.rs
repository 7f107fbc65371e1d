//! Viewer settings read from the environment.
//!
//! | Variable             | Meaning                                   |
//! |----------------------|-------------------------------------------|
//! | `CAMPUS_SEED`        | u64 seed for transit randomness           |
//! | `CAMPUS_LAYOUT`      | JSON layout tables replacing the defaults |
//! | `CAMPUS_CAPTURE`     | any value but `0`/`false` runs the capture script |
//! | `CAMPUS_CAPTURE_DIR` | capture output directory                  |

use std::path::PathBuf;

use campus::CampusError;
use rendering::capture::CaptureSettings;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewerSettings {
    pub seed: Option<u64>,
    pub layout: Option<PathBuf>,
    pub capture: Option<CaptureSettings>,
}

fn enabled(value: &str) -> bool {
    !matches!(value.trim().to_ascii_lowercase().as_str(), "" | "0" | "false" | "no" | "off")
}

impl ViewerSettings {
    pub fn from_env() -> Result<Self, CampusError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, CampusError> {
        let seed = match lookup("CAMPUS_SEED") {
            Some(raw) => Some(
                raw.trim()
                    .parse::<u64>()
                    .map_err(|e| CampusError::Config(format!("CAMPUS_SEED={raw:?}: {e}")))?,
            ),
            None => None,
        };

        let layout = lookup("CAMPUS_LAYOUT")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        let capture = lookup("CAMPUS_CAPTURE").filter(|v| enabled(v)).map(|_| {
            let mut settings = CaptureSettings::default();
            if let Some(dir) = lookup("CAMPUS_CAPTURE_DIR").filter(|d| !d.trim().is_empty()) {
                settings.output_dir = PathBuf::from(dir);
            }
            settings
        });

        Ok(Self {
            seed,
            layout,
            capture,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> Result<ViewerSettings, CampusError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ViewerSettings::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_empty_environment_uses_defaults() {
        assert_eq!(settings(&[]).unwrap(), ViewerSettings::default());
    }

    #[test]
    fn test_seed_is_parsed() {
        assert_eq!(settings(&[("CAMPUS_SEED", " 7 ")]).unwrap().seed, Some(7));
    }

    #[test]
    fn test_bad_seed_is_a_config_error() {
        let err = settings(&[("CAMPUS_SEED", "seven")]).unwrap_err();
        assert!(matches!(err, CampusError::Config(_)));
    }

    #[test]
    fn test_capture_directory_default_and_override() {
        let default = settings(&[("CAMPUS_CAPTURE", "1")]).unwrap().capture.unwrap();
        assert_eq!(default.output_dir, PathBuf::from("captures/webxr"));

        let custom = settings(&[("CAMPUS_CAPTURE", "yes"), ("CAMPUS_CAPTURE_DIR", "/tmp/shots")])
            .unwrap()
            .capture
            .unwrap();
        assert_eq!(custom.output_dir, PathBuf::from("/tmp/shots"));
    }

    #[test]
    fn test_capture_can_be_switched_off() {
        assert!(settings(&[("CAMPUS_CAPTURE", "0")]).unwrap().capture.is_none());
        assert!(settings(&[("CAMPUS_CAPTURE", "false")]).unwrap().capture.is_none());
    }

    #[test]
    fn test_capture_dir_alone_does_not_enable_capture() {
        let s = settings(&[("CAMPUS_CAPTURE_DIR", "/tmp/shots")]).unwrap();
        assert!(s.capture.is_none());
    }
}
