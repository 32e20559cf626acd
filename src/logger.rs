//! 로그 모듈
//!
//! - [`FolderLog`]: 폴더마다 새로 여는 변환 로그 (`DNG/conversion_log.txt` + 콘솔)
//! - [`init_diagnostics`]: stderr로 출력되는 프로세스 진단 로그 (tracing)

use chrono::Local;
use colored::Colorize;
use indicatif::ProgressBar;
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::{DngBatchError, Result};

/// 로그 타임스탬프 형식
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// 로그 레벨
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Info => write!(f, "INFO"),
            Level::Warning => write!(f, "WARNING"),
            Level::Error => write!(f, "ERROR"),
        }
    }
}

/// 폴더 단위 변환 로그
///
/// 파일은 열 때 기존 내용을 지우고, 모든 줄은 콘솔에도 출력됩니다.
/// 값이 drop되면 버퍼가 비워지고 파일이 닫히므로
/// 폴더 처리의 모든 종료 경로에서 로그가 보존됩니다.
pub struct FolderLog {
    path: PathBuf,
    writer: BufWriter<File>,
    progress: Option<ProgressBar>,
}

impl FolderLog {
    /// 로그 파일 열기 (기존 내용 삭제)
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path).map_err(|e| DngBatchError::LogOpen {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(Self {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
            progress: None,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 콘솔 출력이 진행률 바를 깨뜨리지 않도록 연결
    pub fn attach_progress(&mut self, progress: ProgressBar) {
        self.progress = Some(progress);
    }

    pub fn progress_bar(&self) -> Option<&ProgressBar> {
        self.progress.as_ref()
    }

    /// 진행률 바 분리
    pub fn detach_progress(&mut self) -> Option<ProgressBar> {
        self.progress.take()
    }

    pub fn info(&mut self, message: impl AsRef<str>) {
        self.log(Level::Info, message.as_ref());
    }

    pub fn warn(&mut self, message: impl AsRef<str>) {
        self.log(Level::Warning, message.as_ref());
    }

    pub fn error(&mut self, message: impl AsRef<str>) {
        self.log(Level::Error, message.as_ref());
    }

    /// 한 줄 기록
    pub fn log(&mut self, level: Level, message: &str) {
        let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
        let line = format_line(&timestamp, level, message);

        // 파일 쓰기 실패로 폴더 처리를 중단하지 않음
        if let Err(e) = writeln!(self.writer, "{}", line) {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to write log line");
        }

        let console = format!(
            "{} - {} - {}",
            timestamp.dimmed(),
            colorize_level(level),
            message
        );
        match &self.progress {
            Some(pb) => pb.suspend(|| println!("{}", console)),
            None => println!("{}", console),
        }
    }

    /// 버퍼 비우기
    pub fn flush(&mut self) {
        if let Err(e) = self.writer.flush() {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to flush log file");
        }
    }
}

impl Drop for FolderLog {
    fn drop(&mut self) {
        self.flush();
    }
}

/// 로그 파일 한 줄 형식: `날짜 시간 - 레벨 - 메시지`
pub fn format_line(timestamp: &str, level: Level, message: &str) -> String {
    format!("{} - {} - {}", timestamp, level, message)
}

fn colorize_level(level: Level) -> colored::ColoredString {
    match level {
        Level::Info => level.to_string().bright_cyan(),
        Level::Warning => level.to_string().yellow(),
        Level::Error => level.to_string().bright_red(),
    }
}

/// 진단 로그 초기화 (`RUST_LOG`가 있으면 우선)
pub fn init_diagnostics(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("dngbatch=debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("dngbatch=warn"))
    };

    // 테스트 등에서 이미 초기화된 경우 무시
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .try_init();
}
