use std::collections::HashMap;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
}

#[derive(Debug, Clone)]
pub struct TreeEntry {
    pub name: String,
    pub kind: EntryKind,
    pub size: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtensionStat {
    pub files: u64,
    pub bytes: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Census {
    pub files: u64,
    pub folders: u64,
    pub bytes: u64,
    pub by_extension: HashMap<String, ExtensionStat>,
}

#[derive(Debug, Clone)]
pub struct ScanResult {
    pub census: Census,
    pub elapsed: Duration,
}
