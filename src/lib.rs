//! dngbatch - RAW (CR2/CR3) TO DNG BATCH CONVERTER
//!
//! 목록 파일에 적힌 폴더들의 Canon RAW 파일을 Adobe DNG Converter로
//! DNG로 일괄 변환하는 CLI 도구입니다.
//!
//! # 주요 기능
//!
//! - 🗜️ **손실 압축 + Fast Load**: `-lossy -fl` 옵션으로 변환
//! - 📋 **폴더 목록 처리**: 텍스트 파일의 폴더를 순서대로 처리
//! - 🛟 **복사 대체**: 변환 결과가 없으면 원본 파일을 출력 폴더로 복사
//! - 🔒 **덮어쓰기 방지**: 이름 충돌 시 `_1`, `_2` ... 접미사 자동 부여
//! - 📝 **폴더별 로그**: `DNG/conversion_log.txt`에 타임스탬프 로그 저장
//! - 🧪 **드라이런 모드**: 변환 없이 처리 대상만 확인
//!
//! # 예제
//!
//! ```bash
//! # 기본 사용법
//! dngbatch folders.txt
//!
//! # 변환기 경로 직접 지정
//! ADOBE_DNG_PATH="/opt/Adobe DNG Converter" dngbatch folders.txt
//! ```

pub mod cli;
pub mod converter;
pub mod error;
pub mod folders;
pub mod locator;
pub mod logger;
pub mod naming;
pub mod processor;
pub mod stats;

// Re-exports for convenient access
pub use cli::Args;
pub use converter::{ConversionRequest, Converter, ConverterOutput, DngConverter};
pub use error::{DngBatchError, Result};
pub use folders::load_folder_list;
pub use locator::locate_converter;
pub use naming::{unique_name, UniqueName};
pub use processor::{process_folder, FolderReport, FolderStatus, ProcessOptions};
pub use stats::{FileOutcome, FolderStats};
