//! Collection wrapper types for displaying groups of domain objects.

use std::{fmt, ops::Index};

use crate::models::DocumentSummary;

pub struct DocumentSummaries(pub Vec<DocumentSummary>);

impl DocumentSummaries {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, index: usize) -> Option<&DocumentSummary> {
        self.0.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DocumentSummary> {
        self.0.iter()
    }
}

impl Index<usize> for DocumentSummaries {
    type Output = DocumentSummary;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for DocumentSummaries {
    type Item = DocumentSummary;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a DocumentSummaries {
    type Item = &'a DocumentSummary;
    type IntoIter = std::slice::Iter<'a, DocumentSummary>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for DocumentSummaries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No PRDs found. Create your first PRD to get started!")
        } else {
            for summary in &self.0 {
                write!(f, "{summary}")?;
            }
            Ok(())
        }
    }
}
