#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IniValue {
  Bool(bool),
  Integer(u64),
  String(String),
}

/// A decoded ini file. Sections and keys keep the order they were read or inserted in.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IniDocument {
  pub sections: Vec<IniSection>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IniSection {
  pub name: String,
  pub entries: Vec<(String, IniValue)>,
}

/// Result of decoding a file whose kind is picked from its extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Document {
  Ini(IniDocument),
  DeleteFileList(crate::structures::DeleteFileList),
}
