//! HEADER section variables

use indexmap::IndexMap;

use crate::io::dxf::code_page::DEFAULT_CODE_PAGE;
use crate::io::dxf::CodePair;
use crate::notification::{Notification, NotificationType};
use crate::types::{DxfVersion, Handle, Vector3};

/// Drawing header
///
/// The variables the library acts on have typed fields; every other
/// variable is kept verbatim in `variables` and written back after them.
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    /// $ACADVER
    pub version: DxfVersion,
    /// $ACADMAINTVER
    pub maintenance_version: i16,
    /// $DWGCODEPAGE
    pub code_page: String,
    /// $INSBASE
    pub insertion_base: Vector3,
    /// $HANDSEED: the next handle the drawing will hand out
    pub next_available_handle: Handle,
    /// Remaining variables by name (with the `$`), in file order
    pub variables: IndexMap<String, Vec<CodePair>>,
}

impl Header {
    pub fn new() -> Self {
        Header {
            version: DxfVersion::default(),
            maintenance_version: 0,
            code_page: DEFAULT_CODE_PAGE.to_string(),
            insertion_base: Vector3::ZERO,
            next_available_handle: Handle::new(1),
            variables: IndexMap::new(),
        }
    }

    /// Apply one `9/<name>` variable with the pairs that followed it.
    ///
    /// An unrecognized `$ACADVER` keeps the current version and is reported
    /// through the returned notification.
    pub fn apply_variable(&mut self, name: &str, values: Vec<CodePair>) -> Option<Notification> {
        match name {
            "$ACADVER" => {
                let token = values.iter().find(|p| p.code == 1).and_then(|p| p.as_str()).unwrap_or_default();
                match DxfVersion::from_version_string(token) {
                    Some(version) => self.version = version,
                    None => {
                        return Some(Notification::new(
                            NotificationType::Warning,
                            format!("unknown $ACADVER '{}', assuming {}", token, self.version),
                        ))
                    }
                }
            }
            "$ACADMAINTVER" => {
                if let Some(v) = values.iter().find_map(|p| p.as_i16()) {
                    self.maintenance_version = v;
                }
            }
            "$DWGCODEPAGE" => {
                if let Some(v) = values.iter().find_map(|p| p.as_str()) {
                    self.code_page = v.to_string();
                }
            }
            "$INSBASE" => {
                for pair in &values {
                    if let (Some(v), 10 | 20 | 30) = (pair.as_double(), pair.code) {
                        self.insertion_base.set_axis(((pair.code - 10) / 10) as usize, v);
                    }
                }
            }
            "$HANDSEED" => {
                if let Some(h) = values.iter().find_map(|p| p.as_handle()) {
                    self.next_available_handle = h;
                }
            }
            _ => {
                self.variables.insert(name.to_string(), values);
            }
        }
        None
    }

    /// Variables as pairs, each introduced by `9/<name>`
    pub fn code_pairs(&self, version: DxfVersion) -> Vec<CodePair> {
        let mut pairs = vec![
            CodePair::string(9, "$ACADVER"),
            CodePair::string(1, version.to_dxf_string()),
        ];
        if version >= DxfVersion::R14 {
            pairs.push(CodePair::string(9, "$ACADMAINTVER"));
            pairs.push(CodePair::short(70, self.maintenance_version));
        }
        if version >= DxfVersion::R13 {
            pairs.push(CodePair::string(9, "$DWGCODEPAGE"));
            pairs.push(CodePair::string(3, self.code_page.as_str()));
        }
        pairs.push(CodePair::string(9, "$INSBASE"));
        pairs.push(CodePair::double(10, self.insertion_base.x));
        pairs.push(CodePair::double(20, self.insertion_base.y));
        pairs.push(CodePair::double(30, self.insertion_base.z));
        pairs.push(CodePair::string(9, "$HANDSEED"));
        pairs.push(CodePair::handle(5, self.next_available_handle));

        for (name, values) in &self.variables {
            pairs.push(CodePair::string(9, name.as_str()));
            pairs.extend(values.iter().cloned());
        }
        pairs
    }
}

impl Default for Header {
    fn default() -> Self {
        Self::new()
    }
}
