//! 외부 변환기 호출 모듈
//!
//! Adobe DNG Converter를 하위 프로세스로 실행합니다.
//! 종료 코드는 신뢰하지 않으며, 변환 성공 여부는 호출 측에서
//! 예상 출력 파일의 존재 여부로 판단합니다.

use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use crate::error::{DngBatchError, Result};

/// 고정 변환 옵션 (`-lossy`: 손실 압축, `-fl`: Fast Load 데이터 포함)
pub const CONVERTER_FLAGS: &[&str] = &["-lossy", "-fl"];

/// 에러 로그에서 제외할 GPU 관련 경고 문자열
pub const IGNORED_STDERR_MARKER: &str = "GPU";

/// 단일 변환 요청
#[derive(Debug, Clone)]
pub struct ConversionRequest<'a> {
    /// 입력 RAW 파일
    pub input: &'a Path,
    /// 출력 폴더
    pub output_dir: &'a Path,
    /// 출력 파일 이름
    pub output_name: &'a str,
}

/// 변환기 실행 결과 (캡처된 출력)
#[derive(Debug, Clone, Default)]
pub struct ConverterOutput {
    /// 종료 코드 (시그널로 종료된 경우 None)
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

/// RAW → DNG 변환기
///
/// 테스트에서는 출력 파일을 직접 만들거나 만들지 않는 대역으로 교체합니다.
pub trait Converter {
    /// 변환 실행. 프로세스를 띄우지 못한 경우에만 에러를 반환합니다.
    fn convert(&self, request: &ConversionRequest<'_>) -> Result<ConverterOutput>;

    /// 로그에 표시할 명령 템플릿
    fn command_template(&self, output_dir: &Path) -> String;
}

/// Adobe DNG Converter 실행기
#[derive(Debug, Clone)]
pub struct DngConverter {
    program: PathBuf,
}

impl DngConverter {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// 실행 인자 목록 생성
    pub fn build_args(request: &ConversionRequest<'_>) -> Vec<String> {
        let mut args: Vec<String> = CONVERTER_FLAGS.iter().map(|s| s.to_string()).collect();
        args.push("-d".to_string());
        args.push(request.output_dir.display().to_string());
        args.push("-o".to_string());
        args.push(request.output_name.to_string());
        args.push(request.input.display().to_string());
        args
    }
}

impl Converter for DngConverter {
    fn convert(&self, request: &ConversionRequest<'_>) -> Result<ConverterOutput> {
        let args = Self::build_args(request);
        tracing::debug!(program = %self.program.display(), ?args, "running converter");

        let output = Command::new(&self.program)
            .args(&args)
            .output()
            .map_err(|e| DngBatchError::ConverterLaunch {
                program: self.program.clone(),
                source: e,
            })?;

        tracing::debug!(
            input = %request.input.display(),
            status = %describe_status(output.status),
            "converter exited"
        );

        Ok(ConverterOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    fn command_template(&self, output_dir: &Path) -> String {
        let exe_name = self
            .program
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.program.display().to_string());

        format!(
            "{} {} -d \"{}\" -o [OUTPUT_NAME] [INPUT_FILE]",
            exe_name,
            CONVERTER_FLAGS.join(" "),
            output_dir.display()
        )
    }
}

fn describe_status(status: ExitStatus) -> String {
    match status.code() {
        Some(code) => code.to_string(),
        None => "terminated by signal".to_string(),
    }
}

/// 변환기 stderr에서 의미 있는 줄만 추출
///
/// GPU 경고와 빈 줄을 제외합니다.
pub fn meaningful_error_lines(stderr: &str) -> Vec<&str> {
    stderr
        .lines()
        .filter(|line| !line.contains(IGNORED_STDERR_MARKER))
        .filter(|line| !line.trim().is_empty())
        .collect()
}
