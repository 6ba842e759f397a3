use std::{collections::BTreeMap, fmt, sync::Arc};

/// Structured error carrying a stable key plus named arguments, so callers
/// (and the GUI layer above this crate) can match on the key instead of
/// parsing messages.
#[derive(Debug, Clone)]
pub struct VisError {
    pub key: &'static str,
    pub args: BTreeMap<&'static str, String>,
    pub causes: Vec<VisCause>,
}

#[derive(Debug, Clone)]
pub enum VisCause {
    Vis(Box<VisError>),
    Std(Arc<dyn std::error::Error + Send + Sync>),
}

impl VisError {
    pub fn new(key: &'static str) -> Self {
        Self {
            key,
            args: BTreeMap::new(),
            causes: Vec::new(),
        }
    }

    pub fn with_arg(mut self, k: &'static str, v: impl ToString) -> Self {
        self.args.insert(k, v.to_string());
        self
    }

    #[allow(dead_code)]
    pub fn push_vis(mut self, cause: VisError) -> Self {
        self.causes.push(VisCause::Vis(Box::new(cause)));
        self
    }

    #[allow(dead_code)]
    pub fn push_std(mut self, cause: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.causes.push(VisCause::Std(Arc::new(cause)));
        self
    }
}

impl fmt::Display for VisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.key)?;
        let mut first = true;
        for (k, v) in &self.args {
            if !first {
                write!(f, ", ")?;
            }
            first = false;
            write!(f, "{k}={v}")?;
        }
        write!(f, ")")
    }
}

impl std::error::Error for VisError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.causes.iter().find_map(|c| match c {
            VisCause::Vis(e) => Some(e.as_ref() as &dyn std::error::Error),
            VisCause::Std(e) => Some(e.as_ref()),
        })
    }
}

impl From<String> for VisError {
    fn from(s: String) -> Self {
        VisError::new("string-error").with_arg("msg", s)
    }
}

impl From<&str> for VisError {
    fn from(s: &str) -> Self {
        VisError::new("str-error").with_arg("msg", s)
    }
}
