use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IniError {
    #[error("Failed to open file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Empty section name encountered.")]
    EmptySection,

    #[error("Invalid line format: {0}")]
    InvalidLine(String),

    #[error("Invalid key/value pair: {0}")]
    InvalidKeyValue(String),

    #[error("Section not found {0}")]
    SectionNotFound(String),

    #[error("Key not found in section : {0}")]
    KeyNotFound(String),
}

type Section = BTreeMap<String, String>;

/// `[section]` 과 `key = value` 로 이루어진 설정 파일 파서
///
/// # Description
/// - 앞뒤 공백은 제거 되며 빈 줄과 `;` 로 시작하는 줄은 주석으로 무시한다.
/// - 섹션 헤더 이전의 값은 이름이 빈 섹션(`""`)에 저장된다.
/// - 키나 값이 비어 있는 줄은 에러로 처리한다.
/// - 여러번 파싱하면 기존 데이터에 병합되며 같은 키는 나중 값으로 덮어쓴다.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct IniParser {
    data: BTreeMap<String, Section>,
}

impl IniParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), IniError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|source| IniError::Io { path: path.to_path_buf(), source })?;

        self.parse_from_str(&text)
    }

    pub fn parse_from_str(&mut self, text: &str) -> Result<(), IniError> {
        let mut current_section = String::new();

        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with(';') {
                continue;
            }

            if line.starts_with('[') && line.ends_with(']') {
                let name = line[1..line.len() - 1].trim();
                if name.is_empty() {
                    return Err(IniError::EmptySection);
                }
                current_section = name.to_owned();
                continue;
            }

            let (key, value) = line.split_once('=')
                .ok_or_else(|| IniError::InvalidLine(line.to_owned()))?;
            let (key, value) = (key.trim(), value.trim());
            if key.is_empty() || value.is_empty() {
                return Err(IniError::InvalidKeyValue(line.to_owned()));
            }

            self.data.entry(current_section.clone())
                .or_default()
                .insert(key.to_owned(), value.to_owned());
        }

        Ok(())
    }

    pub fn get_value(&self, section: &str, key: &str) -> Result<&str, IniError> {
        let values = self.data.get(section)
            .ok_or_else(|| IniError::SectionNotFound(section.to_owned()))?;

        values.get(key)
            .map(String::as_str)
            .ok_or_else(|| IniError::KeyNotFound(key.to_owned()))
    }

    pub fn set_value(&mut self, section: &str, key: &str, value: &str) {
        self.data.entry(section.to_owned())
            .or_default()
            .insert(key.trim().to_owned(), value.trim().to_owned());
    }

    /// 섹션을 추가한다. 이미 있는 섹션이면 값을 모두 비운다.
    pub fn add_section(&mut self, section: &str) {
        self.data.entry(section.to_owned())
            .or_default()
            .clear();
    }

    pub fn remove_section(&mut self, section: &str) {
        self.data.remove(section);
    }

    pub fn remove_key(&mut self, section: &str, key: &str) {
        if let Some(values) = self.data.get_mut(section) {
            values.remove(key);
        }
    }

    pub fn sections(&self) -> impl Iterator<Item = &str> {
        self.data.keys().map(String::as_str)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), IniError> {
        let path = path.as_ref();
        fs::write(path, self.to_string())
            .map_err(|source| IniError::Io { path: path.to_path_buf(), source })
    }
}

impl std::fmt::Display for IniParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (section, values) in &self.data {
            writeln!(f, "[{}]", section)?;
            for (key, value) in values {
                writeln!(f, "{} = {}", key, value)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "
; Google Books 설정
[Api Key]
Key = AIzaSyExample

[Search]
  Default Term =  rust programming
";

    #[test]
    fn values_are_read_from_sections() {
        let mut parser = IniParser::new();
        parser.parse_from_str(SAMPLE).unwrap();

        assert_eq!(parser.get_value("Api Key", "Key").unwrap(), "AIzaSyExample");
        assert_eq!(parser.get_value("Search", "Default Term").unwrap(), "rust programming");
    }

    #[test]
    fn missing_section_and_key_are_distinguished() {
        let mut parser = IniParser::new();
        parser.parse_from_str(SAMPLE).unwrap();

        assert!(matches!(parser.get_value("Nope", "Key"), Err(IniError::SectionNotFound(s)) if s == "Nope"));
        assert!(matches!(parser.get_value("Api Key", "Secret"), Err(IniError::KeyNotFound(k)) if k == "Secret"));
    }

    #[test]
    fn values_before_any_section_use_empty_name() {
        let mut parser = IniParser::new();
        parser.parse_from_str("mode = test\n[Api Key]\nKey = k").unwrap();

        assert_eq!(parser.get_value("", "mode").unwrap(), "test");
    }

    #[test]
    fn malformed_lines_are_rejected() {
        assert!(matches!(IniParser::new().parse_from_str("[]"), Err(IniError::EmptySection)));
        assert!(matches!(IniParser::new().parse_from_str("[A]\njust text"), Err(IniError::InvalidLine(_))));
        assert!(matches!(IniParser::new().parse_from_str("[A]\nKey ="), Err(IniError::InvalidKeyValue(_))));
        assert!(matches!(IniParser::new().parse_from_str("[A]\n = value"), Err(IniError::InvalidKeyValue(_))));
    }

    #[test]
    fn value_may_contain_equals_sign() {
        let mut parser = IniParser::new();
        parser.parse_from_str("[A]\nquery = a=b").unwrap();

        assert_eq!(parser.get_value("A", "query").unwrap(), "a=b");
    }

    #[test]
    fn later_parse_merges_and_overrides() {
        let mut parser = IniParser::new();
        parser.parse_from_str("[A]\nx = 1\ny = 2").unwrap();
        parser.parse_from_str("[A]\nx = 3").unwrap();

        assert_eq!(parser.get_value("A", "x").unwrap(), "3");
        assert_eq!(parser.get_value("A", "y").unwrap(), "2");
    }

    #[test]
    fn section_and_key_editing() {
        let mut parser = IniParser::new();
        parser.set_value("A", "  x ", " 1 ");
        parser.set_value("A", "y", "2");
        assert_eq!(parser.get_value("A", "x").unwrap(), "1");

        parser.remove_key("A", "x");
        assert!(parser.get_value("A", "x").is_err());

        parser.add_section("A");
        assert!(matches!(parser.get_value("A", "y"), Err(IniError::KeyNotFound(_))));

        parser.remove_section("A");
        assert_eq!(parser.sections().count(), 0);
    }

    #[test]
    fn save_then_parse_reproduces_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("saved.cfg");

        let mut parser = IniParser::new();
        parser.parse_from_str(SAMPLE).unwrap();
        parser.save_to_file(&path).unwrap();

        let mut reloaded = IniParser::new();
        reloaded.parse_from_file(&path).unwrap();

        assert_eq!(parser, reloaded);
        assert!(fs::read_to_string(&path).unwrap().starts_with("[Api Key]\nKey = AIzaSyExample\n\n"));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = IniParser::new().parse_from_file("does/not/exist.cfg").unwrap_err();

        assert!(err.to_string().starts_with("Failed to open file does/not/exist.cfg"));
    }
}
