//! Integration tests for error types

#[cfg(test)]
mod tests {
    use cbuild_errors::*;

    #[test]
    fn test_error_conversion() {
        let cfg_err = ConfigError::NotFound {
            path: "/tmp/missing.toml".into(),
        };
        let err: Error = cfg_err.into();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_error_display() {
        let err = PlatformError::CommandNotFound {
            command: "cmake".into(),
        };
        assert_eq!(err.to_string(), "command not found: cmake");
    }

    #[test]
    fn test_io_error_keeps_kind_and_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = Error::io_with_path(&io_err, "/etc/cbuild/config.toml");
        assert!(matches!(
            err,
            Error::Io {
                kind: std::io::ErrorKind::PermissionDenied,
                ..
            }
        ));
        assert_eq!(err.user_message(), "/etc/cbuild/config.toml: denied");
        assert_eq!(err.user_code(), Some("error.io"));
    }

    #[test]
    fn test_user_facing_codes_and_hints() {
        let err: Error = InvokeError::InvalidDefine {
            definition: "NOEQUALS".into(),
        }
        .into();
        assert_eq!(err.user_code(), Some("invoke.invalid_define"));
        assert!(err.user_hint().is_some());
        assert!(!err.is_retryable());

        let err: Error = PlatformError::ProcessExecutionFailed {
            command: "cmake".into(),
            message: "interrupted".into(),
        }
        .into();
        assert!(err.is_retryable());
        assert_eq!(err.user_code(), Some("platform.process_execution_failed"));
    }

    #[test]
    fn test_json_error_is_internal() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: Error = json_err.into();
        assert!(err.user_message().starts_with("internal error: JSON error"));
        assert_eq!(err.user_code(), Some("error.internal"));
    }
}
