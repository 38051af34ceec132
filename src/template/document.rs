use std::path::Path;
use std::sync::OnceLock;
use regex_lite as regex;

use super::error::TemplateError;
use super::PLACEHOLDER;

fn map_header_pattern() -> &'static regex::Regex {
    static HEADER: OnceLock<regex::Regex> = OnceLock::new();
    HEADER.get_or_init(|| {
        regex::Regex::new(r"\bmap\s+\$host\s+\$upstream_service\s*\{")
            .expect("map header pattern is valid")
    })
}

/// 파싱된 템플릿: 마커 앞 줄들, 마커 들여쓰기, 마커 뒤 줄들.
///
/// 마커 줄 외의 모든 줄은 그대로 보존됩니다.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateDocument {
    prefix: Vec<String>,
    indent: String,
    suffix: Vec<String>,
    trailing_newline: bool,
}

impl TemplateDocument {
    /// 공백을 제외한 내용이 정확히 마커인 줄이 한 번만 있어야 합니다.
    /// `origin`은 에러 메시지에만 쓰입니다.
    pub fn parse(text: &str, origin: &Path) -> Result<Self, TemplateError> {
        let lines: Vec<&str> = text.lines().collect();
        let markers: Vec<usize> = lines
            .iter()
            .enumerate()
            .filter(|(_, line)| line.trim() == PLACEHOLDER)
            .map(|(i, _)| i)
            .collect();

        let at = match markers.as_slice() {
            [] => return Err(TemplateError::PlaceholderMissing {
                path: origin.display().to_string(),
            }),
            [at] => *at,
            _ => return Err(TemplateError::PlaceholderDuplicated {
                path: origin.display().to_string(),
                lines: markers.iter().map(|i| i + 1).collect(),
            }),
        };

        let marker_line = lines[at];
        let indent = marker_line[..marker_line.len() - marker_line.trim_start().len()].to_string();

        Ok(Self {
            prefix: lines[..at].iter().map(|l| l.to_string()).collect(),
            indent,
            suffix: lines[at + 1..].iter().map(|l| l.to_string()).collect(),
            trailing_newline: text.ends_with('\n'),
        })
    }

    /// 마커 자리에 블록을 넣어 최종 설정 텍스트를 만듭니다.
    pub fn render(&self, block: &[String]) -> String {
        let mut lines: Vec<String> = Vec::with_capacity(self.prefix.len() + block.len() + self.suffix.len());
        lines.extend(self.prefix.iter().cloned());
        lines.extend(block.iter().map(|line| {
            if line.is_empty() {
                line.clone()
            } else {
                format!("{}{}", self.indent, line)
            }
        }));
        lines.extend(self.suffix.iter().cloned());

        let mut out = lines.join("\n");
        if self.trailing_newline {
            out.push('\n');
        }
        out
    }
}

/// 기존 설정에서 첫 `map $host $upstream_service { ... }` 블록을 마커 한 줄로 바꿉니다.
///
/// 중괄호는 `#` 주석과 따옴표 안을 제외하고 셉니다. 블록 헤더 앞이나 닫는 중괄호 뒤에
/// 같은 줄로 붙어 있던 설정은 마커 앞뒤의 별도 줄로 남깁니다.
pub fn excise_map_block(text: &str, origin: &Path) -> Result<String, TemplateError> {
    let lines: Vec<&str> = text.lines().collect();

    let (start, header) = lines
        .iter()
        .enumerate()
        .find_map(|(i, line)| {
            let code_end = scan_line(line).comment.unwrap_or(line.len());
            map_header_pattern()
                .find(&line[..code_end])
                .map(|m| (i, m))
        })
        .ok_or_else(|| TemplateError::MapBlockNotFound {
            path: origin.display().to_string(),
        })?;

    // 헤더 정규식은 `{`로 끝나므로 그 위치부터 센다
    let open = header.end() - 1;
    let (end, close) = find_block_end(&lines, start, open).ok_or_else(|| TemplateError::UnbalancedBlock {
        path: origin.display().to_string(),
        line: start + 1,
    })?;

    let header_line = lines[start];
    let indent = &header_line[..header_line.len() - header_line.trim_start().len()];
    let before = header_line[..header.start()].trim_end();
    let after = lines[end][close..].trim();

    let mut out: Vec<String> = Vec::with_capacity(lines.len() - (end - start) + 2);
    out.extend(lines[..start].iter().map(|l| l.to_string()));
    if !before.trim().is_empty() {
        out.push(before.to_string());
    }
    out.push(format!("{}{}", indent, PLACEHOLDER));
    if !after.is_empty() {
        out.push(format!("{}{}", indent, after));
    }
    out.extend(lines[end + 1..].iter().map(|l| l.to_string()));

    let mut result = out.join("\n");
    if text.ends_with('\n') {
        result.push('\n');
    }
    Ok(result)
}

/// 한 줄에서 따옴표 밖에 있는 중괄호 위치와 주석 시작 위치
struct LineScan {
    braces: Vec<(usize, char)>,
    comment: Option<usize>,
}

fn scan_line(line: &str) -> LineScan {
    let mut scan = LineScan { braces: Vec::new(), comment: None };
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (pos, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match (quote, c) {
            (_, '\\') => escaped = true,
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"') | (None, '\'') => quote = Some(c),
            (None, '#') => {
                scan.comment = Some(pos);
                break;
            }
            (None, '{') | (None, '}') => scan.braces.push((pos, c)),
            _ => {}
        }
    }
    scan
}

/// `lines[start]`의 `open` 위치 중괄호가 닫히는 줄 번호와, 닫는 `}` 바로 다음 바이트 위치
fn find_block_end(lines: &[&str], start: usize, open: usize) -> Option<(usize, usize)> {
    let mut depth: i64 = 0;
    for (i, line) in lines.iter().enumerate().skip(start) {
        for (pos, c) in scan_line(line).braces {
            if i == start && pos < open {
                continue;
            }
            if c == '{' {
                depth += 1;
            } else {
                depth -= 1;
                if depth == 0 {
                    return Some((i, pos + 1));
                }
            }
        }
    }
    None
}
