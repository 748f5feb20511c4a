//! # hwpx-layout CLI
//!
//! Usage:
//!   hwpx-layout config.json -o layout.json
//!   hwpx-layout config.json --catalog template/Contents/header.xml
//!   echo '{ ... }' | hwpx-layout
//!   hwpx-layout --example > report.json
//!
//! Prints the layout report as JSON. Set `RUST_LOG=debug` to see style
//! discovery decisions.

use std::env;
use std::fs;
use std::io::{self, Read};
use std::process;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.iter().any(|a| a == "--example") {
        print!("{}", example_report_json());
        return;
    }

    if let Err(msg) = run(&args) {
        eprintln!("✗ {msg}");
        process::exit(1);
    }
}

fn run(args: &[String]) -> Result<(), String> {
    let input = if args.len() > 1 && !args[1].starts_with('-') {
        fs::read_to_string(&args[1]).map_err(|e| format!("Failed to read {}: {e}", args[1]))?
    } else {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| format!("Failed to read stdin: {e}"))?;
        buf
    };

    let catalog = match flag_value(args, "--catalog") {
        Some(path) => Some(
            fs::read_to_string(&path).map_err(|e| format!("Failed to read catalog {path}: {e}"))?,
        ),
        None => None,
    };

    let report = hwpx_layout::layout_json(&input, catalog.as_deref()).map_err(|e| e.to_string())?;
    let json = serde_json::to_string_pretty(&report).map_err(|e| e.to_string())?;

    match flag_value(args, "-o") {
        Some(path) => {
            fs::write(&path, &json).map_err(|e| format!("Failed to write {path}: {e}"))?;
            eprintln!(
                "✓ Laid out {} section(s), written to {}",
                report.sections.len(),
                path
            );
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn flag_value(args: &[String], flag: &str) -> Option<String> {
    args.windows(2).find(|w| w[0] == flag).map(|w| w[1].clone())
}

fn example_report_json() -> &'static str {
    r##"{
  "title": "2024년 상반기 교육 운영 보고",
  "date": "24.7.1",
  "department": "교육운영팀",
  "sections": [
    {
      "type": "body",
      "title_bar": "상반기 교육 운영 결과",
      "content": [
        { "type": "heading", "text": "추진 배경" },
        { "type": "bullet", "text": "교육생 증가에 따라 운영 방식을 개선하고, 평가 체계를 정비할 필요가 있음" },
        { "type": "dash", "text": "상반기 신규 교육생 320명 (전년 대비 18% 증가)" },
        { "type": "star", "text": "세부 수치는 붙임 참고" },
        { "type": "heading", "text": "운영 현황" },
        {
          "type": "table",
          "caption": "과정별 운영 현황",
          "headers": ["과정", "인원", "수료율"],
          "rows": [
            ["기초 과정", 180, "92%"],
            ["심화 과정", 140, "87%"]
          ]
        },
        { "type": "note", "text": "수료율은 6월 30일 기준" }
      ]
    },
    {
      "type": "appendix",
      "title_bar": "참고1",
      "appendix_title": "세부 일정",
      "content": [
        { "type": "bullet", "text": "7월: 하반기 모집 공고" },
        { "type": "bullet", "text": "8월: 선발 및 오리엔테이션" }
      ]
    }
  ]
}
"##
}
