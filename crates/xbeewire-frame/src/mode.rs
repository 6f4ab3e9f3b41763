use std::fmt;

/// Operating mode of the serial link to the local module.
///
/// Only the two API modes carry API frames. Transparent mode is raw serial
/// data with no framing at all, so the codec rejects it rather than guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OperatingMode {
    /// Transparent (AT) mode, `AP=0`. No framing.
    At,
    /// API mode without escapes, `AP=1`.
    #[default]
    Api,
    /// API mode with escaped control bytes, `AP=2`.
    ApiEscape,
}

impl OperatingMode {
    /// True for the two API modes.
    pub fn is_api(&self) -> bool {
        matches!(self, OperatingMode::Api | OperatingMode::ApiEscape)
    }

    /// True when control bytes are escaped on the wire.
    pub fn escapes(&self) -> bool {
        matches!(self, OperatingMode::ApiEscape)
    }
}

impl fmt::Display for OperatingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OperatingMode::At => "AT mode",
            OperatingMode::Api => "API mode",
            OperatingMode::ApiEscape => "API mode with escaping",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_modes_are_api() {
        assert!(!OperatingMode::At.is_api());
        assert!(OperatingMode::Api.is_api());
        assert!(OperatingMode::ApiEscape.is_api());
    }

    #[test]
    fn only_escaped_mode_escapes() {
        assert!(!OperatingMode::Api.escapes());
        assert!(OperatingMode::ApiEscape.escapes());
    }
}
