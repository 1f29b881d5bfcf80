use std::sync::Arc;

use super::row::DisplayRow;

pub trait RowPredicate: Send {
    fn matches(&self, row: &DisplayRow) -> bool;
}

impl<F> RowPredicate for F
where
    F: Fn(&DisplayRow) -> bool + Send,
{
    fn matches(&self, row: &DisplayRow) -> bool {
        self(row)
    }
}

struct FilterLink {
    predicate: Option<Box<dyn RowPredicate>>,
    rows: Vec<Arc<DisplayRow>>,
}

impl FilterLink {
    /// Only entry rows are judged; headers, spacers and loading rows pass every filter.
    fn accepts(&self, row: &DisplayRow) -> bool {
        match &self.predicate {
            Some(predicate) if row.kind.is_entry() => predicate.matches(row),
            _ => true,
        }
    }
}

pub struct FilterChain {
    links: Vec<FilterLink>,
}

impl Default for FilterChain {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterChain {
    pub fn new() -> Self {
        Self {
            links: vec![FilterLink {
                predicate: None,
                rows: Vec::new(),
            }],
        }
    }

    pub fn add(&mut self, row: DisplayRow) {
        let row = Arc::new(row);
        for link in &mut self.links {
            if !link.accepts(&row) {
                return;
            }
            link.rows.push(Arc::clone(&row));
        }
    }

    /// Installs `predicate` as the new tail, seeded from the current tail's rows.
    pub fn add_filter(&mut self, predicate: Box<dyn RowPredicate>) {
        let mut link = FilterLink {
            predicate: Some(predicate),
            rows: Vec::new(),
        };
        link.rows = self
            .tail()
            .rows
            .iter()
            .filter(|row| link.accepts(row))
            .cloned()
            .collect();
        self.links.push(link);
    }

    /// Drops the most recently added filter. Returns false when no filter is installed.
    pub fn remove_filter(&mut self) -> bool {
        if self.links.len() > 1 {
            self.links.pop();
            true
        } else {
            false
        }
    }

    pub fn clear(&mut self) {
        for link in &mut self.links {
            link.rows.clear();
        }
    }

    pub fn visible_rows(&self) -> &[Arc<DisplayRow>] {
        &self.tail().rows
    }

    pub fn filter_depth(&self) -> usize {
        self.links.len() - 1
    }

    fn tail(&self) -> &FilterLink {
        // links[0] is never removed
        &self.links[self.links.len() - 1]
    }
}

#[cfg(test)]
#[path = "../tests/ref_view/chain_tests.rs"]
mod tests;
