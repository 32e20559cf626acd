//! 폴더 목록 파일 로딩 모듈

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{DngBatchError, Result};

/// 폴더 목록 파일을 읽어 처리할 폴더 경로 목록 반환
///
/// 각 줄의 앞뒤 공백을 제거하고 빈 줄은 건너뜁니다.
/// 입력 순서를 그대로 유지하며 중복 제거는 하지 않습니다.
pub fn load_folder_list(list_path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(list_path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => DngBatchError::ListFileNotFound {
            path: list_path.to_path_buf(),
        },
        _ => DngBatchError::ListFileRead {
            path: list_path.to_path_buf(),
            source: e,
        },
    })?;

    Ok(parse_folder_list(&content))
}

/// 목록 텍스트를 폴더 경로 목록으로 변환
pub fn parse_folder_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}
