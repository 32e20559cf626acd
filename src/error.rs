//! 에러 타입 정의 모듈
//!
//! dngbatch에서 발생할 수 있는 모든 에러 타입을 정의합니다.
//! 치명적 에러(목록 파일, 플랫폼, 변환기)는 배치 시작 전에 프로세스를 종료시키고,
//! 나머지는 폴더 또는 파일 단위로 기록된 뒤 다음 작업으로 넘어갑니다.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// dngbatch에서 발생할 수 있는 에러 타입
#[derive(Error, Debug)]
pub enum DngBatchError {
    /// 폴더 목록 파일이 존재하지 않음
    #[error("The provided list file does not exist: {path}")]
    ListFileNotFound { path: PathBuf },

    /// 폴더 목록 파일 읽기 실패
    #[error("Could not read list file {path}: {source}")]
    ListFileRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// 기본 변환기 경로가 등록되지 않은 OS
    #[error("Unsupported Operating System: {os}")]
    UnsupportedPlatform { os: String },

    /// 변환기 실행 파일 없음
    #[error(
        "Adobe DNG Converter not found at: {path}. \
         Please install it or set the 'ADOBE_DNG_PATH' environment variable."
    )]
    ConverterNotFound { path: PathBuf },

    /// 처리할 폴더가 없거나 폴더가 아님
    #[error("Invalid directory path: {path}")]
    InvalidFolder { path: PathBuf },

    /// 출력 폴더 생성 실패
    #[error("Could not create output directory at {path}: {source}")]
    OutputDirCreate {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// 폴더별 로그 파일 열기 실패
    #[error("Could not create log file {path}: {source}")]
    LogOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// 변환기 프로세스 실행 자체가 실패
    #[error("Failed to run converter {program}: {source}")]
    ConverterLaunch {
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    /// 원본 파일 복사 실패
    #[error("Failed to copy {from} to {to}: {source}")]
    CopyFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    /// 충돌 회피용 접미사를 모두 소진
    #[error("No free file name for {base}{extension} in {dir} after {attempts} attempts")]
    NameSpaceExhausted {
        dir: PathBuf,
        base: String,
        extension: String,
        attempts: u32,
    },
}

/// dngbatch 결과 타입 별칭
pub type Result<T> = std::result::Result<T, DngBatchError>;
