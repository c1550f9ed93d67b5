//! Presentation order for handling institutions.
//!
//! The summary table lists offices in a fixed priority order. Listed names
//! rank by their position; any other name ranks after every listed one, so a
//! stable sort by [`InstitutionOrder::rank`] keeps unlisted offices in the
//! order they were first seen.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstitutionOrder {
    names: Vec<String>,
}

impl InstitutionOrder {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Sort rank for an institution name. Exact match only.
    ///
    /// "芜湖" → 1 in the standard list; "总部" → `len()`.
    pub fn rank(&self, name: &str) -> usize {
        self.names
            .iter()
            .position(|n| n == name)
            .unwrap_or(self.names.len())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order() -> InstitutionOrder {
        InstitutionOrder::new(["合肥", "芜湖", "蚌埠"])
    }

    #[test]
    fn listed_names_rank_by_position() {
        let o = order();
        assert_eq!(o.rank("合肥"), 0);
        assert_eq!(o.rank("芜湖"), 1);
        assert_eq!(o.rank("蚌埠"), 2);
    }

    #[test]
    fn unlisted_names_rank_last() {
        let o = order();
        assert_eq!(o.rank("总部"), 3);
        assert_eq!(o.rank(""), 3);
        assert!(!o.contains("总部"));
    }

    #[test]
    fn match_is_exact() {
        let o = order();
        assert_eq!(o.rank("合肥中心支公司"), 3);
        assert_eq!(o.rank(" 合肥"), 3);
    }

    #[test]
    fn stable_sort_keeps_unlisted_in_encounter_order() {
        let o = order();
        let mut names = vec!["总部", "蚌埠", "省直", "合肥"];
        names.sort_by_key(|n| o.rank(n));
        assert_eq!(names, vec!["合肥", "蚌埠", "总部", "省直"]);
    }

    #[test]
    fn empty_order_ranks_everything_equal() {
        let o = InstitutionOrder::default();
        assert!(o.is_empty());
        assert_eq!(o.rank("合肥"), 0);
    }
}
