//! Institution rollup of case verdicts.

use std::collections::HashMap;

use claimcheck_core::verdict::TOTAL_ROW_LABEL;
use claimcheck_core::{CaseVerdict, InstitutionOrder, InstitutionSummaryRow};

/// Group verdicts by institution and append the grand total.
///
/// Groups are ordered by [`InstitutionOrder::rank`]; unlisted institutions
/// follow in first-encounter order. The 合计 row is always last.
pub fn summarize<'a, I>(order: &InstitutionOrder, cases: I) -> Vec<InstitutionSummaryRow>
where
    I: IntoIterator<Item = (&'a str, &'a CaseVerdict)>,
{
    // Accumulate: institution → (total, qualified), in first-encounter order.
    let mut groups: Vec<(&str, u64, u64)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for (institution, verdict) in cases {
        let slot = *index.entry(institution).or_insert_with(|| {
            groups.push((institution, 0, 0));
            groups.len() - 1
        });
        let entry = &mut groups[slot];
        entry.1 += 1;
        if verdict.qualified {
            entry.2 += 1;
        }
    }

    groups.sort_by_key(|(name, _, _)| order.rank(name));

    let total_cases = groups.iter().map(|g| g.1).sum();
    let total_qualified = groups.iter().map(|g| g.2).sum();

    let mut rows: Vec<InstitutionSummaryRow> = groups
        .into_iter()
        .map(|(name, total, qualified)| InstitutionSummaryRow::new(name, total, qualified))
        .collect();
    rows.push(InstitutionSummaryRow::new(
        TOTAL_ROW_LABEL,
        total_cases,
        total_qualified,
    ));
    rows
}
