/// One raw access-log line split into fields.
///
/// Fields are separated by single spaces. A field that starts with `"` runs
/// until the matching closing quote, so quoted request lines and user agents
/// stay in one piece. Inside quotes `""` is an escaped quote and a backslash
/// keeps the following character verbatim (Apache writes `\"` in agents).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogRecord {
    fields: Vec<String>,
}

impl LogRecord {
    pub fn parse(line: &str) -> Self {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.is_empty() {
            return Self::default();
        }

        let mut fields = Vec::new();
        let mut current = String::new();
        let mut chars = line.chars().peekable();
        let mut at_field_start = true;

        while let Some(c) = chars.next() {
            match c {
                ' ' => {
                    fields.push(std::mem::take(&mut current));
                    at_field_start = true;
                    continue;
                }
                '"' if at_field_start => {
                    // quoted section; whatever follows the closing quote is
                    // still part of this field
                    while let Some(q) = chars.next() {
                        match q {
                            '"' if chars.peek() == Some(&'"') => {
                                chars.next();
                                current.push('"');
                            }
                            '"' => break,
                            '\\' => {
                                current.push('\\');
                                if let Some(escaped) = chars.next() {
                                    current.push(escaped);
                                }
                            }
                            other => current.push(other),
                        }
                    }
                }
                other => current.push(other),
            }
            at_field_start = false;
        }
        fields.push(current);

        Self { fields }
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }
}
