/// Stack of field names from the root to the field being processed.
#[derive(Debug, Default)]
pub(crate) struct FieldPath<'a> {
    segments: Vec<&'a str>,
}

impl<'a> FieldPath<'a> {
    pub(crate) fn push(&mut self, name: &'a str) {
        self.segments.push(name);
    }

    pub(crate) fn pop(&mut self) {
        self.segments.pop();
    }

    /// Dotted form, `<root>` at the top level.
    pub(crate) fn render(&self) -> String {
        if self.segments.is_empty() {
            "<root>".to_string()
        } else {
            self.segments.join(".")
        }
    }
}
