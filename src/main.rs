//! dngbatch - RAW (CR2/CR3) TO DNG BATCH CONVERTER
//!
//! 메인 엔트리포인트

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use std::path::Path;

use dngbatch::{
    cli::Args,
    converter::DngConverter,
    folders::load_folder_list,
    locator::locate_converter_for_current_os,
    logger::init_diagnostics,
    processor::{collect_raw_files, process_folder, resolve_source, ProcessOptions},
};

fn main() -> Result<()> {
    let args = Args::parse();

    init_diagnostics(args.verbose);

    // 목록 파일 확인 (변환기 탐색보다 먼저)
    validate_input(&args)?;

    // 변환기 탐색: 실패하면 어떤 폴더도 건드리지 않고 종료
    let program = locate_converter_for_current_os(args.converter.as_deref())?;
    tracing::debug!(program = %program.display(), "using converter");

    let folders = load_folder_list(&args.list_file)?;

    print_header(&args, &program, folders.len());

    if args.dry_run {
        print_dry_run(&folders);
        return Ok(());
    }

    let converter = DngConverter::new(program);
    let options = ProcessOptions::new().with_progress(!args.no_progress);

    for (i, folder) in folders.iter().enumerate() {
        println!(
            "\n{} Processing Folder {}/{}: {}",
            ">>>".bright_blue().bold(),
            i + 1,
            folders.len(),
            folder
        );

        let report = process_folder(folder, &converter, &options);
        tracing::debug!(folder = %report.folder, status = ?report.status, "folder finished");
    }

    println!("\n{}", "Batch processing complete.".bright_green().bold());

    Ok(())
}

/// 목록 파일 유효성 검사
fn validate_input(args: &Args) -> Result<()> {
    if !args.list_file.exists() {
        anyhow::bail!("The provided list file does not exist: {:?}", args.list_file);
    }

    if !args.list_file.is_file() {
        anyhow::bail!("The provided list path is not a file: {:?}", args.list_file);
    }

    Ok(())
}

/// 헤더 출력
fn print_header(args: &Args, program: &Path, folder_count: usize) {
    println!("\n{}", "═".repeat(50).bright_blue());
    println!(
        "{}",
        " 📸 RAW TO DNG BATCH CONVERTER".bright_white().bold()
    );
    println!("{}", "═".repeat(50).bright_blue());

    let list_name = args
        .list_file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| args.list_file.display().to_string());

    println!("  {} 폴더 목록: {}", "📋".bright_cyan(), list_name);
    println!("  {} 변환기: {}", "⚙️".bright_yellow(), program.display());
    println!(
        "  {} 처리할 폴더 수: {}",
        "📂".bright_white(),
        folder_count.to_string().bright_green()
    );

    if args.dry_run {
        println!(
            "  {} {}",
            "⚠️".bright_yellow(),
            "드라이런 모드 (실제 변환 없음)".yellow()
        );
    }

    println!("{}", "═".repeat(50).bright_blue());
}

/// 드라이런 출력: 아무 파일도 만들지 않음
fn print_dry_run(folders: &[String]) {
    println!("\n{}", "📋 처리 예정 목록:".bright_cyan());

    let mut total_files = 0;
    for (i, folder) in folders.iter().enumerate() {
        let source = match resolve_source(folder) {
            Ok(source) => source,
            Err(e) => {
                println!("  {}. {} {}", i + 1, "SKIPPING:".yellow(), e);
                continue;
            }
        };

        let raw_files = collect_raw_files(&source);
        total_files += raw_files.len();

        println!(
            "  {}. {} ({} RAW)",
            i + 1,
            source.display(),
            raw_files.len().to_string().bright_green()
        );
        for path in &raw_files {
            println!("     • {:?}", path.file_name().unwrap_or_default());
        }
    }

    println!(
        "\n{} 총 {} 개의 RAW 파일이 처리될 예정입니다.",
        "ℹ️".bright_blue(),
        total_files.to_string().bright_green()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn args_for(list_file: PathBuf) -> Args {
        Args {
            list_file,
            converter: None,
            verbose: false,
            dry_run: false,
            no_progress: true,
        }
    }

    #[test]
    fn test_validate_input_missing_list() {
        let temp_dir = TempDir::new().unwrap();
        let args = args_for(temp_dir.path().join("folders.txt"));

        let err = validate_input(&args).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_validate_input_directory_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let args = args_for(temp_dir.path().to_path_buf());

        assert!(validate_input(&args).is_err());
    }

    #[test]
    fn test_validate_input_ok() {
        let temp_dir = TempDir::new().unwrap();
        let list = temp_dir.path().join("folders.txt");
        fs::write(&list, "/photos\n").unwrap();

        assert!(validate_input(&args_for(list)).is_ok());
    }

    #[test]
    fn test_dry_run_creates_nothing() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("IMG_0001.CR2"), b"raw").unwrap();
        let folder = temp_dir.path().to_string_lossy().into_owned();

        print_dry_run(&[folder, "/definitely/missing/folder".to_string()]);

        assert!(!temp_dir.path().join("DNG").exists());
    }
}
