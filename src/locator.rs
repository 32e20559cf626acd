//! 변환기 실행 파일 탐색 모듈
//!
//! 사용자 지정 경로(`ADOBE_DNG_PATH`)를 먼저 확인하고,
//! 없으면 OS별 기본 설치 경로 테이블에서 찾습니다.

use std::path::{Path, PathBuf};

use crate::error::{DngBatchError, Result};

/// 변환기 경로를 지정하는 환경 변수 이름
pub const CONVERTER_ENV_VAR: &str = "ADOBE_DNG_PATH";

/// OS 식별자(`std::env::consts::OS`)별 기본 설치 경로
pub const DEFAULT_CONVERTER_PATHS: &[(&str, &str)] = &[
    (
        "windows",
        r"C:\Program Files\Adobe\Adobe DNG Converter\Adobe DNG Converter.exe",
    ),
    (
        "macos",
        "/Applications/Adobe DNG Converter.app/Contents/MacOS/Adobe DNG Converter",
    ),
];

/// OS 식별자에 해당하는 기본 경로 조회
pub fn default_converter_path(os: &str) -> Option<&'static str> {
    DEFAULT_CONVERTER_PATHS
        .iter()
        .find(|(id, _)| *id == os)
        .map(|(_, path)| *path)
}

/// 변환기 실행 파일 경로 결정
///
/// # Arguments
/// * `override_path` - 사용자 지정 경로 (존재하는 경우에만 사용)
/// * `os` - OS 식별자
///
/// # Returns
/// 존재가 확인된 실행 파일 경로 또는 치명적 에러
pub fn locate_converter(override_path: Option<&Path>, os: &str) -> Result<PathBuf> {
    if let Some(path) = override_path {
        if path.exists() {
            return Ok(path.to_path_buf());
        }
        tracing::debug!(path = %path.display(), "override path does not exist, using platform default");
    }

    let default = default_converter_path(os).ok_or_else(|| DngBatchError::UnsupportedPlatform {
        os: os.to_string(),
    })?;

    let path = PathBuf::from(default);
    if !path.exists() {
        return Err(DngBatchError::ConverterNotFound { path });
    }

    Ok(path)
}

/// 현재 OS 기준으로 변환기 경로 결정
pub fn locate_converter_for_current_os(override_path: Option<&Path>) -> Result<PathBuf> {
    locate_converter(override_path, std::env::consts::OS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_override_used_verbatim() {
        let temp_dir = TempDir::new().unwrap();
        let exe = temp_dir.path().join("fake-converter");
        fs::write(&exe, b"").unwrap();

        let located = locate_converter(Some(&exe), "plan9").unwrap();
        assert_eq!(located, exe);
    }

    #[test]
    fn test_missing_override_falls_back_to_platform() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope");

        let result = locate_converter(Some(&missing), "plan9");
        assert!(matches!(
            result,
            Err(DngBatchError::UnsupportedPlatform { ref os }) if os == "plan9"
        ));
    }

    #[test]
    fn test_unsupported_platform() {
        let result = locate_converter(None, "linux");
        assert!(matches!(
            result,
            Err(DngBatchError::UnsupportedPlatform { .. })
        ));
    }

    #[test]
    fn test_default_path_table() {
        assert!(default_converter_path("windows")
            .unwrap()
            .ends_with("Adobe DNG Converter.exe"));
        assert!(default_converter_path("macos")
            .unwrap()
            .starts_with("/Applications/"));
        assert_eq!(default_converter_path("linux"), None);
    }

    #[test]
    fn test_converter_not_found_message() {
        let err = DngBatchError::ConverterNotFound {
            path: PathBuf::from("/missing/converter"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/missing/converter"));
        assert!(msg.contains(CONVERTER_ENV_VAR));
    }
}
