use super::column::Column;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// The active sort: which column (by key) and in which direction.
///
/// Absence of a `SortState` means rows are shown in the caller's order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SortState {
    pub column: String,
    pub direction: SortDirection,
}

impl SortState {
    pub fn ascending(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: SortDirection::Ascending,
        }
    }

    /// State after activating `column`'s header.
    ///
    /// Same column flips between ascending and descending (there is no way back to unsorted by
    /// clicking); any other column starts ascending.
    pub fn next(current: Option<&SortState>, column: &str) -> SortState {
        match current {
            Some(s) if s.column == column => SortState {
                column: s.column.clone(),
                direction: s.direction.flipped(),
            },
            _ => SortState::ascending(column),
        }
    }

    pub fn aria_for(current: Option<&SortState>, column: &str) -> AriaSort {
        match current {
            Some(s) if s.column == column => match s.direction {
                SortDirection::Ascending => AriaSort::Ascending,
                SortDirection::Descending => AriaSort::Descending,
            },
            _ => AriaSort::None,
        }
    }
}

/// Header sort indicator, mirroring the `aria-sort` attribute values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AriaSort {
    Ascending,
    Descending,
    None,
}

impl AriaSort {
    pub fn as_str(self) -> &'static str {
        match self {
            AriaSort::Ascending => "ascending",
            AriaSort::Descending => "descending",
            AriaSort::None => "none",
        }
    }
}

/// Reorders `order` (indices into `rows`) by `column` in `direction`.
///
/// The sort is stable over the order it is given: rows whose values compare equal keep their
/// current relative position. `rows` itself is never touched.
pub fn sort_order<T>(order: &mut [usize], rows: &[T], column: &Column<T>, direction: SortDirection) {
    let mut keyed: Vec<_> = order.iter().map(|&i| (i, column.value(&rows[i]))).collect();
    keyed.sort_by(|(_, a), (_, b)| {
        let ord = a.natural_cmp(b);
        match direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });
    for (slot, (i, _)) in order.iter_mut().zip(keyed) {
        *slot = i;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datatable::row::Record;

    fn ages(order: &[usize], rows: &[Record]) -> Vec<String> {
        order.iter().map(|&i| rows[i].get("age").to_string()).collect()
    }

    #[test]
    fn same_column_flips_and_other_column_restarts() {
        let s1 = SortState::next(None, "age");
        assert_eq!(s1, SortState::ascending("age"));
        let s2 = SortState::next(Some(&s1), "age");
        assert_eq!(s2.direction, SortDirection::Descending);
        let s3 = SortState::next(Some(&s2), "age");
        assert_eq!(s3.direction, SortDirection::Ascending);
        let s4 = SortState::next(Some(&s2), "name");
        assert_eq!(s4, SortState::ascending("name"));
    }

    #[test]
    fn aria_only_marks_active_column() {
        let s = SortState {
            column: "age".into(),
            direction: SortDirection::Descending,
        };
        assert_eq!(SortState::aria_for(Some(&s), "age").as_str(), "descending");
        assert_eq!(SortState::aria_for(Some(&s), "name"), AriaSort::None);
        assert_eq!(SortState::aria_for(None, "age"), AriaSort::None);
    }

    #[test]
    fn sorts_by_natural_order_in_both_directions() {
        let rows = vec![
            Record::new(1).with("age", 30),
            Record::new(2).with("age", 25),
            Record::new(3).with("age", 40),
        ];
        let col = Column::field("age", "Age");
        let mut order = vec![0, 1, 2];
        sort_order(&mut order, &rows, &col, SortDirection::Ascending);
        assert_eq!(ages(&order, &rows), ["25", "30", "40"]);
        sort_order(&mut order, &rows, &col, SortDirection::Descending);
        assert_eq!(ages(&order, &rows), ["40", "30", "25"]);
    }

    #[test]
    fn ties_keep_prior_relative_order() {
        let rows = vec![
            Record::new(1).with("g", "b"),
            Record::new(2).with("g", "a"),
            Record::new(3).with("g", "b"),
            Record::new(4).with("g", "a"),
        ];
        let col = Column::field("g", "G");
        let mut order = vec![3, 2, 1, 0];
        sort_order(&mut order, &rows, &col, SortDirection::Ascending);
        assert_eq!(order, [3, 1, 2, 0]);
        sort_order(&mut order, &rows, &col, SortDirection::Descending);
        assert_eq!(order, [2, 0, 3, 1]);
    }
}
