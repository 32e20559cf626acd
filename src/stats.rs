//! 통계 모듈
//!
//! 폴더 단위 변환 결과 집계와 요약 포맷팅을 담당합니다.

use std::time::{Duration, Instant};

/// 파일 하나의 처리 결과
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    /// DNG 변환 성공
    Converted,
    /// 변환 실패 후 원본 복사
    Copied,
    /// 변환과 복사 모두 실패
    Errored,
}

/// 폴더 처리 통계
#[derive(Debug, Clone)]
pub struct FolderStats {
    /// 발견된 RAW 파일 수
    pub total_files: usize,
    pub converted: usize,
    pub copied: usize,
    pub errored: usize,
    start_time: Instant,
}

impl Default for FolderStats {
    fn default() -> Self {
        Self::new(0)
    }
}

impl FolderStats {
    /// 새 통계 인스턴스 생성
    pub fn new(total_files: usize) -> Self {
        Self {
            total_files,
            converted: 0,
            copied: 0,
            errored: 0,
            start_time: Instant::now(),
        }
    }

    /// 결과 하나 기록
    pub fn record(&mut self, outcome: FileOutcome) {
        match outcome {
            FileOutcome::Converted => self.converted += 1,
            FileOutcome::Copied => self.copied += 1,
            FileOutcome::Errored => self.errored += 1,
        }
    }

    /// 처리 완료된 파일 수
    pub fn processed(&self) -> usize {
        self.converted + self.copied + self.errored
    }

    /// 경과 시간 반환
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// 요약 한 줄
    pub fn summary_line(&self) -> String {
        format!(
            "SUMMARY: {} Converted (DNG) | {} Copied (Originals) | {} Total Failures",
            self.converted, self.copied, self.errored
        )
    }
}

/// 경과 시간을 읽기 쉬운 형식으로 변환
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    let millis = duration.subsec_millis();

    if secs >= 3600 {
        let hours = secs / 3600;
        let mins = (secs % 3600) / 60;
        format!("{}h {}m", hours, mins)
    } else if secs >= 60 {
        let mins = secs / 60;
        let remaining_secs = secs % 60;
        format!("{}m {}s", mins, remaining_secs)
    } else if secs > 0 {
        format!("{}.{:03}s", secs, millis)
    } else {
        format!("{}ms", millis)
    }
}
