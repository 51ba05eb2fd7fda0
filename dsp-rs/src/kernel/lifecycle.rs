use super::ConfigError;

/// Constructor validation lifecycle shared by kernel structs.
pub trait KernelLifecycle: Sized {
    /// Kernel config type.
    type Config;

    /// Construct a validated kernel from config.
    fn try_new(config: Self::Config) -> Result<Self, ConfigError>;
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, KernelLifecycle};
    use crate::signal::wave::{OscillatorConfig, OscillatorKernel, Waveform};
    use crate::stats::{VarianceConfig, VarianceKernel};

    #[test]
    fn lifecycle_constructor_accepts_valid_config() {
        let kernel = VarianceKernel::try_new(VarianceConfig { ddof: 1 }).expect("valid config");
        assert_eq!(kernel.ddof(), 1);
    }

    #[test]
    fn lifecycle_constructor_rejects_invalid_config() {
        let err = OscillatorKernel::try_new(OscillatorConfig {
            sample_rate: 0.0,
            ..OscillatorConfig::new(Waveform::Sine, 440.0, 44_100.0)
        })
        .expect_err("invalid config");
        assert_eq!(
            err,
            ConfigError::InvalidArgument {
                arg: "sample_rate",
                reason: "sample rate must be finite and > 0",
            }
        );
    }
}
