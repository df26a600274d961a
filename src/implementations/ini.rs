use ini::{Ini, ParseOption};

use crate::structures::{Error, IniDocument, IniSection, IniValue};

impl IniValue {
  /// `0` and `1` are booleans, other digit strings are integers, the rest stays text.
  pub fn parse(raw: &str) -> Self {
    match raw {
      "0" => Self::Bool(false),
      "1" => Self::Bool(true),
      _ if !raw.is_empty() && raw.bytes().all(|byte| byte.is_ascii_digit()) => {
        match raw.parse::<u64>() {
          Ok(number) => Self::Integer(number),
          Err(_) => Self::String(raw.to_string()),
        }
      },
      _ => Self::String(raw.to_string()),
    }
  }

  pub fn as_str(&self) -> Option<&str> {
    match self {
      Self::String(value) => Some(value),
      _ => None,
    }
  }
}

impl std::fmt::Display for IniValue {
  fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    match self {
      Self::Bool(true) => write!(f, "1"),
      Self::Bool(false) => write!(f, "0"),
      Self::Integer(number) => write!(f, "{}", number),
      Self::String(value) => write!(f, "{}", value),
    }
  }
}

impl From<&str> for IniValue {
  fn from(value: &str) -> Self {
    Self::String(value.to_string())
  }
}

impl IniSection {
  pub fn new(name: &str) -> Self {
    Self {
      name: name.to_string(),
      entries: Vec::new(),
    }
  }

  pub fn get(&self, key: &str) -> Option<&IniValue> {
    self.entries.iter().find(|(name, _)| name == key).map(|(_, value)| value)
  }

  /// Replaces the value in place if the key exists, appends it otherwise.
  pub fn set(&mut self, key: &str, value: IniValue) {
    match self.entries.iter_mut().find(|(name, _)| name == key) {
      Some(entry) => entry.1 = value,
      None => self.entries.push((key.to_string(), value)),
    }
  }
}

impl IniDocument {
  /// Parses with quoting and escapes off so values come through untouched.
  /// Keys outside of any section are dropped.
  pub fn decode(text: &str) -> Result<Self, Error> {
    let options = ParseOption {
      enabled_quote: false,
      enabled_escape: false,
      ..ParseOption::default()
    };
    let ini = Ini::load_from_str_opt(text, options)?;
    let mut document = Self::default();
    for (name, properties) in ini.iter() {
      let name = match name {
        Some(name) => name.trim(),
        None => continue,
      };
      let index = document.section_index_or_insert(name);
      for (key, value) in properties.iter() {
        if !key.is_empty() {
          document.sections[index].set(key, IniValue::parse(value));
        }
      }
    }
    Ok(document)
  }

  pub fn encode(&self) -> String {
    let mut output = String::new();
    for (index, section) in self.sections.iter().enumerate() {
      if index > 0 {
        output.push_str("\n\n");
      }
      output.push_str(&format!("[{}]", section.name));
      for (key, value) in &section.entries {
        output.push_str(&format!("\n{}={}", key, value));
      }
    }
    output
  }

  pub fn section(&self, name: &str) -> Option<&IniSection> {
    self.sections.iter().find(|section| section.name == name)
  }

  pub fn get(&self, section: &str, key: &str) -> Option<&IniValue> {
    self.section(section).and_then(|section| section.get(key))
  }

  /// Sets a value, creating the section when it doesn't exist yet.
  pub fn set(&mut self, section: &str, key: &str, value: IniValue) {
    let index = self.section_index_or_insert(section);
    self.sections[index].set(key, value);
  }

  fn section_index_or_insert(&mut self, name: &str) -> usize {
    match self.sections.iter().position(|section| section.name == name) {
      Some(index) => index,
      None => {
        self.sections.push(IniSection::new(name));
        self.sections.len() - 1
      }
    }
  }
}
