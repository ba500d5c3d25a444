//! List ordering: ascending by `company`, stable.

use std::cmp::Ordering;

use icu_collator::{Collator, CollatorOptions};

use crate::record::Record;

thread_local! {
  /// Root-locale collator; built once per thread from the compiled-in data.
  static COLLATOR: Option<Collator> =
    Collator::try_new(&Default::default(), CollatorOptions::new()).ok();
}

/// Locale-aware comparison (Unicode root collation): accents and case are
/// secondary and tertiary differences, so `Émile` sorts among the `E`s and
/// `acme` just before `Acme`.
pub fn compare_company(a: &str, b: &str) -> Ordering {
  COLLATOR.with(|collator| match collator {
    Some(collator) => collator.compare(a, b),
    None => fallback_compare(a, b),
  })
}

/// Case-folded code-point order, used only if the collation data failed to
/// load.
fn fallback_compare(a: &str, b: &str) -> Ordering {
  a.chars()
    .flat_map(char::to_lowercase)
    .cmp(b.chars().flat_map(char::to_lowercase))
    .then_with(|| b.cmp(a))
}

/// Sort `records` by company. Ties keep their original relative order.
pub fn sort_by_company(records: &mut [Record]) {
  records.sort_by(|a, b| compare_company(&a.fields.company, &b.fields.company));
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::record::{EventFields, RecordId};

  fn rec(id: u64, company: &str) -> Record {
    Record::new(id, EventFields {
      company: company.into(),
      ..EventFields::default()
    })
  }

  fn ids(records: &[Record]) -> Vec<RecordId> {
    records.iter().map(|r| r.id.clone()).collect()
  }

  #[test]
  fn sorts_ascending_by_company() {
    let mut records = vec![rec(1, "Zeta"), rec(2, "Acme")];
    sort_by_company(&mut records);
    assert_eq!(ids(&records), [RecordId::from(2_u64), RecordId::from(1_u64)]);
  }

  #[test]
  fn equal_companies_keep_store_order() {
    let mut records = vec![
      rec(1, "Beta"),
      rec(2, "Acme"),
      rec(3, "Beta"),
      rec(4, "Acme"),
    ];
    sort_by_company(&mut records);
    assert_eq!(
      ids(&records),
      [2_u64, 4, 1, 3].map(RecordId::from)
    );
  }

  #[test]
  fn case_is_secondary() {
    assert_eq!(compare_company("acme", "Beta"), Ordering::Less);
    assert_eq!(compare_company("Acme", "beta"), Ordering::Less);
    assert_eq!(compare_company("acme", "Acme"), Ordering::Less);
    assert_eq!(compare_company("Acme", "Acme"), Ordering::Equal);
  }

  #[test]
  fn accented_names_sort_with_their_base_letter() {
    assert_eq!(compare_company("Émile", "Zeta"), Ordering::Less);
    assert_eq!(compare_company("Émile", "Emma"), Ordering::Less);
    assert_eq!(compare_company("Ångström", "Bravo"), Ordering::Less);
    assert_eq!(compare_company("école", "Ecole"), Ordering::Greater);

    let mut records = vec![rec(1, "Zeta"), rec(2, "Émile"), rec(3, "Acme"), rec(4, "Éclair")];
    sort_by_company(&mut records);
    assert_eq!(ids(&records), [3_u64, 4, 2, 1].map(RecordId::from));
  }

  #[test]
  fn prefix_sorts_first() {
    assert_eq!(compare_company("Acme", "Acme Corp"), Ordering::Less);
  }
}
