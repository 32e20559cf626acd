//! 폴더 처리 모듈
//!
//! 폴더 하나의 RAW 파일을 DNG로 변환하고, 변환에 실패한 파일은
//! 원본을 출력 폴더에 복사합니다. 파일이나 폴더 단위 실패는
//! 기록만 하고 배치 전체를 중단하지 않습니다.

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::{self, File, FileTimes};
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::converter::{meaningful_error_lines, ConversionRequest, Converter};
use crate::error::{DngBatchError, Result};
use crate::logger::FolderLog;
use crate::naming::{unique_name, UniqueName};
use crate::stats::{format_duration, FileOutcome, FolderStats};

/// 출력 폴더 이름
pub const OUTPUT_DIR_NAME: &str = "DNG";

/// 폴더별 로그 파일 이름
pub const LOG_FILE_NAME: &str = "conversion_log.txt";

/// 지원 RAW 확장자 (소문자)
pub const SUPPORTED_EXTENSIONS: &[&str] = &["cr2", "cr3"];

/// 폴더 처리 상태
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FolderStatus {
    /// 모든 RAW 파일 처리 완료 (파일이 없던 경우 포함)
    Completed,
    /// 폴더가 없거나 폴더가 아니어서 건너뜀
    Skipped(String),
    /// 출력 폴더나 로그 파일을 만들지 못해 중단
    Aborted(String),
}

/// 폴더 처리 결과
#[derive(Debug, Clone)]
pub struct FolderReport {
    /// 목록 파일에 적힌 원래 경로
    pub folder: String,
    /// 출력 폴더 (생성된 경우)
    pub output_dir: Option<PathBuf>,
    pub status: FolderStatus,
    pub stats: FolderStats,
}

impl FolderReport {
    fn new(folder: &str, status: FolderStatus) -> Self {
        Self {
            folder: folder.to_string(),
            output_dir: None,
            status,
            stats: FolderStats::default(),
        }
    }
}

/// 폴더 처리 옵션
#[derive(Debug, Clone, Default)]
pub struct ProcessOptions {
    /// 파일 진행률 바 표시
    pub show_progress: bool,
}

impl ProcessOptions {
    /// 기본 옵션 생성
    pub fn new() -> Self {
        Self::default()
    }

    /// 진행률 바 설정
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }
}

/// 확장자가 지원 RAW 형식인지 확인 (대소문자 무시)
pub fn is_supported_raw(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
        .unwrap_or(false)
}

/// 목록의 폴더 경로를 절대 경로로 변환하고 폴더인지 확인
pub fn resolve_source(folder: &str) -> Result<PathBuf> {
    // 건너뛴 폴더도 절대 경로로 표시
    let invalid = || DngBatchError::InvalidFolder {
        path: std::path::absolute(folder).unwrap_or_else(|_| PathBuf::from(folder)),
    };

    let path = Path::new(folder).canonicalize().map_err(|_| invalid())?;
    if !path.is_dir() {
        return Err(invalid());
    }
    Ok(path)
}

/// 폴더 바로 아래의 RAW 파일 수집 (하위 폴더는 탐색하지 않음)
///
/// 순서는 파일 시스템의 나열 순서를 따릅니다.
pub fn collect_raw_files(source: &Path) -> Vec<PathBuf> {
    WalkDir::new(source)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file())
        .filter(|e| is_supported_raw(e.path()))
        .map(|e| e.path().to_path_buf())
        .collect()
}

/// 출력 폴더 생성 (이미 있으면 그대로 사용)
pub fn ensure_output_dir(source: &Path) -> Result<PathBuf> {
    let dest = source.join(OUTPUT_DIR_NAME);

    match fs::create_dir(&dest) {
        Ok(()) => Ok(dest),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists && dest.is_dir() => Ok(dest),
        Err(e) => Err(DngBatchError::OutputDirCreate {
            path: dest,
            source: e,
        }),
    }
}

/// 폴더 하나 처리
///
/// # Arguments
/// * `folder` - 목록 파일에 적힌 폴더 경로
/// * `converter` - RAW → DNG 변환기
/// * `options` - 처리 옵션
///
/// # Returns
/// 폴더 처리 상태와 통계를 담은 `FolderReport`
pub fn process_folder(
    folder: &str,
    converter: &dyn Converter,
    options: &ProcessOptions,
) -> FolderReport {
    let source = match resolve_source(folder) {
        Ok(path) => path,
        Err(e) => {
            println!("{} {}", "SKIPPING:".yellow().bold(), e);
            return FolderReport::new(folder, FolderStatus::Skipped(e.to_string()));
        }
    };

    let dest = match ensure_output_dir(&source) {
        Ok(dest) => dest,
        Err(e) => {
            println!("{} {}", "CRITICAL ERROR:".bright_red().bold(), e);
            return FolderReport::new(folder, FolderStatus::Aborted(e.to_string()));
        }
    };

    let mut log = match FolderLog::create(&dest.join(LOG_FILE_NAME)) {
        Ok(log) => log,
        Err(e) => {
            println!("{} {}", "CRITICAL ERROR:".bright_red().bold(), e);
            let mut report = FolderReport::new(folder, FolderStatus::Aborted(e.to_string()));
            report.output_dir = Some(dest);
            return report;
        }
    };

    let stats = convert_folder(&mut log, &source, &dest, converter, options);

    FolderReport {
        folder: folder.to_string(),
        output_dir: Some(dest),
        status: FolderStatus::Completed,
        stats,
    }
}

/// 출력 폴더와 로그가 준비된 뒤의 변환 루프
fn convert_folder(
    log: &mut FolderLog,
    source: &Path,
    dest: &Path,
    converter: &dyn Converter,
    options: &ProcessOptions,
) -> FolderStats {
    log.info(format!("Started processing. Log saved to: {}", dest.display()));
    log.info(format!(
        "Batch Conversion Command Template: {}",
        converter.command_template(dest)
    ));

    let raw_files = collect_raw_files(source);
    if raw_files.is_empty() {
        log.warn("No supported RAW files found in this directory.");
        return FolderStats::new(0);
    }

    let total = raw_files.len();
    log.info(format!("Found {} RAW files to process.", total));

    let mut stats = FolderStats::new(total);
    log.attach_progress(create_progress_bar(total, options.show_progress));

    for (i, raw_file) in raw_files.iter().enumerate() {
        log.info(format!(
            "[{}/{}] Processing: {}",
            i + 1,
            total,
            display_name(raw_file)
        ));

        let outcome = process_raw_file(log, converter, raw_file, dest);
        stats.record(outcome);

        if let Some(pb) = log.progress_bar() {
            pb.inc(1);
        }
    }

    if let Some(pb) = log.detach_progress() {
        pb.finish_and_clear();
    }

    log.info("-".repeat(40));
    log.info(stats.summary_line());
    log.info(format!("Elapsed: {}", format_duration(stats.elapsed())));
    log.info("=".repeat(40));

    stats
}

/// RAW 파일 하나 변환, 실패 시 원본 복사
///
/// 파일마다 변환 1회, 실패 시 복사 1회만 시도합니다.
pub fn process_raw_file(
    log: &mut FolderLog,
    converter: &dyn Converter,
    raw_file: &Path,
    dest: &Path,
) -> FileOutcome {
    let name = display_name(raw_file);
    let stem = raw_file
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| name.clone());

    let dng = match unique_name(dest, &stem, ".dng") {
        Ok(dng) => dng,
        Err(e) => {
            log.error(format!("  -> Could not pick an output name for {}: {}", name, e));
            return FileOutcome::Errored;
        }
    };

    if dng.was_renamed() {
        log.warn(format!(
            "  -> Name collision detected. Saving as: {}",
            dng.file_name
        ));
    }

    let request = ConversionRequest {
        input: raw_file,
        output_dir: dest,
        output_name: &dng.file_name,
    };

    let output = match converter.convert(&request) {
        Ok(output) => output,
        Err(e) => {
            log.error(format!("Unexpected error processing {}: {}", name, e));
            return FileOutcome::Errored;
        }
    };

    // 종료 코드가 아니라 출력 파일 존재 여부로 성공을 판단
    if dng.path.exists() {
        return FileOutcome::Converted;
    }

    tracing::debug!(
        file = %name,
        exit_code = ?output.exit_code,
        stdout = %output.stdout,
        stderr = %output.stderr,
        "converter produced no output"
    );

    log.warn(format!("  -> Conversion FAILED for {}.", name));
    let details = meaningful_error_lines(&output.stderr);
    if !details.is_empty() {
        log.warn(format!("     Adobe Error Details: {}", details.join("; ")));
    }

    log.info("  -> Attempting to COPY original file to output folder...");

    match copy_original(raw_file, dest, &stem) {
        Ok(copy) => {
            if copy.was_renamed() {
                log.info(format!(
                    "  -> Original file copied with rename: {}",
                    copy.file_name
                ));
            } else {
                log.info("  -> Original file copied successfully.");
            }
            FileOutcome::Copied
        }
        Err(e) => {
            log.error(format!(
                "  -> CRITICAL: Failed to convert AND failed to copy {}",
                name
            ));
            log.error(format!("     Copy Error: {}", e));
            FileOutcome::Errored
        }
    }
}

/// 원본 RAW 파일을 출력 폴더에 복사 (원래 확장자 유지)
fn copy_original(raw_file: &Path, dest: &Path, stem: &str) -> Result<UniqueName> {
    let extension = raw_file
        .extension()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let target = unique_name(dest, stem, &extension)?;

    fs::copy(raw_file, &target.path).map_err(|e| DngBatchError::CopyFailed {
        from: raw_file.to_path_buf(),
        to: target.path.clone(),
        source: e,
    })?;

    if let Err(e) = preserve_timestamps(raw_file, &target.path) {
        tracing::warn!(file = %target.path.display(), error = %e, "could not preserve timestamps");
    }

    Ok(target)
}

/// 복사본에 원본의 접근/수정 시간 적용
fn preserve_timestamps(from: &Path, to: &Path) -> io::Result<()> {
    let metadata = fs::metadata(from)?;
    let mut times = FileTimes::new().set_modified(metadata.modified()?);
    if let Ok(accessed) = metadata.accessed() {
        times = times.set_accessed(accessed);
    }

    let file = File::options().write(true).open(to)?;
    file.set_times(times)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// 진행률 바 생성
fn create_progress_bar(total: usize, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(total as u64);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
    {
        pb.set_style(style.progress_chars("█▓▒░"));
    }
    pb
}
