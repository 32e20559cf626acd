//! CLI 인자 파싱 모듈
//!
//! clap을 사용한 명령줄 인자 정의 및 파싱을 담당합니다.

use clap::Parser;
use std::path::PathBuf;

use crate::locator::CONVERTER_ENV_VAR;

/// dngbatch CLI 인자 구조체
#[derive(Parser, Debug)]
#[command(
    name = "dngbatch",
    author = "YourName <your@email.com>",
    version,
    about = "RAW (CR2/CR3) TO DNG BATCH CONVERTER - 폴더 목록의 RAW 파일을 Adobe DNG Converter로 일괄 변환",
    long_about = r#"
RAW (CR2/CR3) TO DNG BATCH CONVERTER
====================================

목록 파일에 적힌 폴더를 차례로 돌면서 CR2/CR3 파일을
Adobe DNG Converter로 변환해 각 폴더의 DNG 하위 폴더에 저장합니다.

특징:
  • 손실 압축(-lossy) + Fast Load 데이터(-fl) 변환
  • 변환 실패 시 원본 파일을 DNG 폴더로 복사
  • 같은 이름이 있으면 _1, _2 ... 접미사로 덮어쓰기 방지
  • 폴더마다 DNG/conversion_log.txt 로그 저장

예제:
  dngbatch folders.txt
  ADOBE_DNG_PATH=/opt/dng/converter dngbatch folders.txt
  dngbatch folders.txt --dry-run
"#
)]
pub struct Args {
    /// 처리할 폴더 경로 목록 파일 (한 줄에 하나, 빈 줄 무시)
    pub list_file: PathBuf,

    /// Adobe DNG Converter 실행 파일 경로 (기본값: OS별 설치 경로)
    #[arg(long, env = CONVERTER_ENV_VAR)]
    pub converter: Option<PathBuf>,

    /// 상세 진단 로그 출력 (stderr)
    #[arg(short, long)]
    pub verbose: bool,

    /// 실제 변환 없이 처리될 폴더와 파일 목록만 표시
    #[arg(long)]
    pub dry_run: bool,

    /// 진행률 바 숨기기
    #[arg(long)]
    pub no_progress: bool,
}
