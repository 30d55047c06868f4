//! Macro for closed string-backed domain enums
//!
//! Timer statuses, timer types and analytics periods are stored and
//! exchanged as lowercase strings. This macro gives each enum one mapping
//! table and derives the conversions from it.
//!
//! # Example
//!
//! ```rust
//! use tempo_domain::impl_domain_status_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Mode {
//!     Focus,
//!     Break,
//! }
//!
//! impl_domain_status_conversions!(Mode {
//!     Focus => "focus",
//!     Break => "break",
//! });
//!
//! assert_eq!(Mode::Focus.as_str(), "focus");
//! assert_eq!("BREAK".parse::<Mode>(), Ok(Mode::Break));
//! assert_eq!(Mode::ALL.len(), 2);
//! ```

/// Implements `as_str`, `ALL`, `Display` and `FromStr` for a fieldless enum
///
/// Generated items:
/// - `as_str()`: the canonical lowercase wire form
/// - `ALL`: every variant in declaration order
/// - `Display`: writes `as_str()`
/// - `FromStr`: case-insensitive parse; unknown input yields
///   `"Invalid <Enum>: <input>"`
#[macro_export]
macro_rules! impl_domain_status_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl $enum_name {
            /// Every variant in declaration order
            pub const ALL: &'static [$enum_name] = &[$(Self::$variant),+];

            /// Canonical lowercase string form
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $str,)+
                }
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                let trimmed = s.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|variant| variant.as_str().eq_ignore_ascii_case(trimmed))
                    .ok_or_else(|| format!("Invalid {}: {}", stringify!($enum_name), s))
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Phase {
        Idle,
        Running,
        Done,
    }

    impl_domain_status_conversions!(Phase {
        Idle => "idle",
        Running => "running",
        Done => "done",
    });

    #[test]
    fn test_display_uses_wire_form() {
        assert_eq!(Phase::Idle.to_string(), "idle");
        assert_eq!(Phase::Running.to_string(), "running");
        assert_eq!(Phase::Done.as_str(), "done");
    }

    #[test]
    fn test_fromstr_ignores_case_and_padding() {
        assert_eq!(Phase::from_str("RUNNING").unwrap(), Phase::Running);
        assert_eq!(Phase::from_str("Done").unwrap(), Phase::Done);
        assert_eq!(Phase::from_str("  idle ").unwrap(), Phase::Idle);
    }

    #[test]
    fn test_fromstr_invalid() {
        let err = Phase::from_str("paused").unwrap_err();
        assert_eq!(err, "Invalid Phase: paused");
        assert!(Phase::from_str("").is_err());
    }

    #[test]
    fn test_all_lists_variants_in_order() {
        assert_eq!(Phase::ALL, &[Phase::Idle, Phase::Running, Phase::Done]);
    }
}
