use serde::Deserialize;
use thiserror::Error;

pub(crate) const TUNING_ENV_VAR: &str = "PLATFORMER_TUNING";

// g = 9.8 m/s^2 at 10 px/m and 60 ticks/s.
pub(crate) const GRAVITY: f32 = 1.63;
pub(crate) const TOP_SPEED: f32 = 8.5;
pub(crate) const COYOTE_FRAMES: u16 = 5;
pub(crate) const PLAYER_SPEED: f32 = 1.0;
pub(crate) const PLAYER_JUMP_SPEED: f32 = 15.0;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct PlayerTuning {
    pub(crate) speed: f32,
    pub(crate) jump_speed: f32,
    pub(crate) gravity: f32,
    pub(crate) top_speed: f32,
    pub(crate) coyote_frames: u16,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            speed: PLAYER_SPEED,
            jump_speed: PLAYER_JUMP_SPEED,
            gravity: GRAVITY,
            top_speed: TOP_SPEED,
            coyote_frames: COYOTE_FRAMES,
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum TuningError {
    #[error("failed to read {var}: {source}")]
    EnvVar {
        var: &'static str,
        #[source]
        source: std::env::VarError,
    },
    #[error("invalid tuning json at {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("tuning field {field} must be finite and non-negative, got {value}")]
    OutOfRange { field: &'static str, value: f32 },
}

impl PlayerTuning {
    /// Reads the JSON override from the environment. Absent means defaults.
    pub(crate) fn from_env() -> Result<Self, TuningError> {
        match std::env::var(TUNING_ENV_VAR) {
            Ok(raw) => Self::parse(&raw),
            Err(std::env::VarError::NotPresent) => Ok(Self::default()),
            Err(source) => Err(TuningError::EnvVar {
                var: TUNING_ENV_VAR,
                source,
            }),
        }
    }

    pub(crate) fn parse(raw: &str) -> Result<Self, TuningError> {
        let mut deserializer = serde_json::Deserializer::from_str(raw);
        let tuning: Self =
            serde_path_to_error::deserialize(&mut deserializer).map_err(|error| {
                let path = error.path().to_string();
                TuningError::Parse {
                    path,
                    source: error.into_inner(),
                }
            })?;
        tuning.validate()?;
        Ok(tuning)
    }

    fn validate(&self) -> Result<(), TuningError> {
        for (field, value) in [
            ("speed", self.speed),
            ("jump_speed", self.jump_speed),
            ("gravity", self.gravity),
            ("top_speed", self.top_speed),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(TuningError::OutOfRange { field, value });
            }
        }
        Ok(())
    }
}
