use super::*;
use crate::{
    test_fixtures::{ArticleRating, Leaderboard, Reading},
    traits::EntityKind,
};
use tracing_test::traced_test;

fn descriptor<E: EntityKind>(kind: SliceKind) -> SliceDescriptor {
    SliceDescriptor::new(E::MODEL, kind, &SliceConfig::default())
}

fn ints(values: &[i64]) -> Vec<Value> {
    values.iter().copied().map(Value::from).collect()
}

#[test]
fn fresh_select_resolves_with_defaults() {
    let mut d = descriptor::<ArticleRating>(SliceKind::Select);
    d.set_partition_components(ints(&[42])).unwrap();

    let slice = d.resolve().unwrap();

    assert_eq!(
        slice.partition,
        vec![Restriction::Eq {
            column: "article_id",
            value: Value::Int(42),
        }]
    );
    assert!(slice.clustering.is_empty());
    assert_eq!(slice.limit, Some(100));
    assert_eq!(slice.consistency, ConsistencyLevel::One);
    assert_eq!(
        slice.ordering,
        Some(ResolvedOrdering {
            column: "rating",
            requested: OrderingMode::Ascending,
            effective: OrderingMode::Ascending,
            explicit: false,
        })
    );
}

#[test]
fn delete_starts_without_limit_or_ordering() {
    let mut d = descriptor::<ArticleRating>(SliceKind::Delete);
    d.set_partition_components(ints(&[42])).unwrap();

    let slice = d.resolve().unwrap();

    assert_eq!(slice.limit, None);
    assert_eq!(slice.ordering, None);
}

#[test]
fn missing_partition_fails_at_resolution() {
    let d = descriptor::<ArticleRating>(SliceKind::Select);

    assert_eq!(
        d.resolve(),
        Err(SliceError::IncompletePartitionKey {
            entity: "article_rating",
            required: 1,
            found: 0,
        })
    );
}

#[test]
fn composite_partition_accepts_in_suffix() {
    let mut d = descriptor::<Reading>(SliceKind::Select);
    d.set_partition_components(vec![Value::from("s1")]).unwrap();
    d.set_partition_components_in(ints(&[1, 2])).unwrap();

    let slice = d.resolve().unwrap();

    assert_eq!(
        slice.partition,
        vec![
            Restriction::Eq {
                column: "sensor",
                value: Value::from("s1"),
            },
            Restriction::In {
                column: "bucket",
                values: ints(&[1, 2]),
            },
        ]
    );
}

#[test]
fn duplicate_in_clause_is_rejected() {
    let mut d = descriptor::<ArticleRating>(SliceKind::Select);
    d.set_partition_components_in(ints(&[1])).unwrap();

    assert_eq!(
        d.set_partition_components_in(ints(&[2])),
        Err(SliceError::DuplicateInClause {
            entity: "article_rating",
            key: KeyKind::Partition,
        })
    );
}

#[test]
fn range_on_descending_column_mirrors_operators() {
    let mut d = descriptor::<Leaderboard>(SliceKind::Select);
    d.set_partition_components(vec![Value::from("weekly")])
        .unwrap();
    d.set_from_clusterings(ints(&[2])).unwrap();
    d.set_to_clusterings(ints(&[4])).unwrap();

    let slice = d.resolve().unwrap();

    assert_eq!(
        slice.clustering,
        vec![
            Restriction::Slice {
                columns: vec!["score"],
                op: CompareOp::Lte,
                values: ints(&[2]),
            },
            Restriction::Slice {
                columns: vec!["score"],
                op: CompareOp::Gte,
                values: ints(&[4]),
            },
        ]
    );
    assert_eq!(slice.limit, Some(100));
    assert_eq!(
        slice.ordering.map(|o| o.effective),
        Some(OrderingMode::Descending)
    );
}

#[test]
fn multi_column_bound_keeps_column_tuple() {
    let mut d = descriptor::<Reading>(SliceKind::Select);
    d.set_partition_components(vec![Value::from("s1"), Value::from(3)])
        .unwrap();
    d.set_from_clusterings(vec![Value::Timestamp(100), Value::from(2)])
        .unwrap();

    let slice = d.resolve().unwrap();

    assert_eq!(
        slice.clustering,
        vec![Restriction::Slice {
            columns: vec!["at", "seq"],
            op: CompareOp::Gte,
            values: vec![Value::Timestamp(100), Value::Int(2)],
        }]
    );
    assert_eq!(slice.slice_bound(CompareOp::Gte), None);
}

#[test]
fn clustering_filters_require_a_complete_partition() {
    let mut d = descriptor::<Reading>(SliceKind::Select);
    d.set_partition_components(vec![Value::from("s1")]).unwrap();

    for err in [
        d.set_from_clusterings(vec![Value::Timestamp(100)]),
        d.set_to_clusterings(vec![Value::Timestamp(100)]),
        d.set_clusterings(vec![Value::Timestamp(100)]),
    ] {
        assert!(matches!(
            err,
            Err(SliceError::IncompletePartitionKey {
                required: 2,
                found: 1,
                ..
            })
        ));
    }
    assert_eq!(d.clustering(), &ClusteringFilter::None);

    d.set_partition_components_in(ints(&[1, 2])).unwrap();
    d.set_from_clusterings(vec![Value::Timestamp(100)]).unwrap();
}

#[test]
fn exact_match_with_in_suffix() {
    let mut d = descriptor::<Leaderboard>(SliceKind::Select);
    d.set_partition_components(vec![Value::from("weekly")])
        .unwrap();
    d.set_clusterings(ints(&[10])).unwrap();
    d.set_clusterings_in(vec![Value::from("ada"), Value::from("bob")])
        .unwrap();

    let slice = d.resolve().unwrap();

    assert_eq!(
        slice.clustering,
        vec![
            Restriction::Eq {
                column: "score",
                value: Value::Int(10),
            },
            Restriction::In {
                column: "player",
                values: vec![Value::from("ada"), Value::from("bob")],
            },
        ]
    );
    assert_eq!(
        d.set_clusterings_in(vec![Value::from("cy")]),
        Err(SliceError::DuplicateInClause {
            entity: "leaderboard",
            key: KeyKind::Clustering,
        })
    );
}

#[test]
fn zero_limit_and_fetch_size_are_rejected() {
    let mut d = descriptor::<ArticleRating>(SliceKind::Iterate);

    assert_eq!(
        d.set_limit(0),
        Err(SliceError::NonPositiveLimit {
            entity: "article_rating"
        })
    );
    assert_eq!(
        d.set_fetch_size(0),
        Err(SliceError::NonPositiveFetchSize {
            entity: "article_rating"
        })
    );
    assert_eq!(d.limit(), LimitSpec::Default);
    assert_eq!(d.fetch_size(), None);
}

#[test]
fn force_limit_overrides_disabled_limit() {
    let mut d = descriptor::<ArticleRating>(SliceKind::Select);
    d.set_partition_components(ints(&[1])).unwrap();
    d.disable_limit();
    d.force_limit(1);

    assert_eq!(d.resolve().unwrap().limit, Some(1));
}

#[test]
fn consistency_override_wins_over_default() {
    let mut d = descriptor::<ArticleRating>(SliceKind::Select);
    d.set_partition_components(ints(&[1])).unwrap();
    d.set_consistency(ConsistencyLevel::LocalQuorum);

    assert_eq!(d.resolve().unwrap().consistency, ConsistencyLevel::LocalQuorum);
}

#[test]
fn resolution_is_repeatable() {
    let mut d = descriptor::<ArticleRating>(SliceKind::Select);
    d.set_partition_components(ints(&[7])).unwrap();
    d.set_from_clusterings(ints(&[1])).unwrap();

    assert_eq!(d.resolve(), d.resolve());
}

//
// Ordering drop for paged IN queries
//

#[test]
#[traced_test]
fn fetch_size_after_in_and_ordering_drops_ordering() {
    let mut d = descriptor::<ArticleRating>(SliceKind::Iterate);
    d.set_partition_components_in(ints(&[1, 2])).unwrap();
    d.set_ordering(OrderingMode::Ascending);
    d.set_fetch_size(10).unwrap();

    let slice = d.resolve().unwrap();

    assert_eq!(slice.ordering, None);
    assert_eq!(slice.fetch_size, Some(10));
    assert_eq!(
        slice.diagnostics,
        vec![SliceDiagnostic::OrderingDroppedForPagedIn {
            entity: "article_rating"
        }]
    );
    assert!(logs_contain("ordering dropped for entity 'article_rating'"));
}

#[test]
#[traced_test]
fn ordering_after_fetch_size_and_in_is_also_dropped() {
    let mut d = descriptor::<ArticleRating>(SliceKind::Iterate);
    d.set_fetch_size(10).unwrap();
    d.set_partition_components_in(ints(&[1, 2])).unwrap();
    d.set_ordering(OrderingMode::Descending);

    assert_eq!(d.ordering(), None);
    assert_eq!(d.diagnostics().len(), 1);
    assert!(logs_contain("paging cannot be combined with ordering"));
}

#[test]
fn default_ordering_is_omitted_when_paging_over_in() {
    let mut d = descriptor::<ArticleRating>(SliceKind::Iterate);
    d.set_partition_components_in(ints(&[1, 2])).unwrap();
    d.set_fetch_size(10).unwrap();

    let slice = d.resolve().unwrap();

    assert_eq!(slice.ordering, None);
    assert!(slice.diagnostics.is_empty());
}

#[test]
#[traced_test]
fn repeated_ordering_after_drop_is_reported_once() {
    let mut d = descriptor::<ArticleRating>(SliceKind::Iterate);
    d.set_partition_components_in(ints(&[1, 2])).unwrap();
    d.set_fetch_size(10).unwrap();
    d.set_ordering(OrderingMode::Ascending);
    d.set_ordering(OrderingMode::Descending);
    d.set_ordering(OrderingMode::Ascending);

    assert_eq!(d.ordering(), None);
    assert_eq!(d.diagnostics().len(), 1);
    logs_assert(|lines: &[&str]| {
        match lines
            .iter()
            .filter(|line| line.contains("ordering dropped"))
            .count()
        {
            1 => Ok(()),
            n => Err(format!("expected one warning, found {n}")),
        }
    });
}

#[test]
fn fetch_size_without_in_keeps_ordering() {
    let mut d = descriptor::<ArticleRating>(SliceKind::Iterate);
    d.set_partition_components(ints(&[1])).unwrap();
    d.set_ordering(OrderingMode::Descending);
    d.set_fetch_size(10).unwrap();

    let slice = d.resolve().unwrap();

    assert_eq!(
        slice.ordering.map(|o| (o.requested, o.explicit)),
        Some((OrderingMode::Descending, true))
    );
    assert!(slice.diagnostics.is_empty());
}

//
// Matching shortcuts
//

#[test]
fn last_matching_differs_from_first_only_in_ordering() {
    let mut first = descriptor::<Reading>(SliceKind::Select);
    let mut last = descriptor::<Reading>(SliceKind::Select);
    for d in [&mut first, &mut last] {
        d.set_partition_components(vec![Value::from("s1"), Value::from(1)])
            .unwrap();
    }
    let keys = vec![Value::Timestamp(5), Value::from(9)];

    first
        .apply_matching_shortcut(MatchingShortcut::First { limit: 3 }, keys.clone())
        .unwrap();
    last.apply_matching_shortcut(MatchingShortcut::Last { limit: 3 }, keys)
        .unwrap();

    let first = first.resolve().unwrap();
    let mut last = last.resolve().unwrap();

    assert_eq!(
        last.ordering.map(|o| o.requested),
        Some(OrderingMode::Descending)
    );
    assert_eq!(last.limit, Some(3));
    last.ordering = first.ordering;
    assert_eq!(first, last);
}

#[test]
fn shortcut_rejects_explicit_limit_and_ordering() {
    let mut limited = descriptor::<ArticleRating>(SliceKind::Select);
    limited.set_partition_components(ints(&[1])).unwrap();
    limited.set_limit(5).unwrap();

    assert_eq!(
        limited.apply_matching_shortcut(MatchingShortcut::One, ints(&[3])),
        Err(SliceError::ShortcutConflict {
            entity: "article_rating",
            shortcut: "get_one_matching",
            field: "limit",
        })
    );

    let mut ordered = descriptor::<ArticleRating>(SliceKind::Select);
    ordered.set_partition_components(ints(&[1])).unwrap();
    ordered.set_ordering(OrderingMode::Ascending);

    assert_eq!(
        ordered.apply_matching_shortcut(MatchingShortcut::First { limit: 2 }, ints(&[3])),
        Err(SliceError::ShortcutConflict {
            entity: "article_rating",
            shortcut: "get_first_matching",
            field: "ordering",
        })
    );
}

#[test]
fn one_matching_forces_single_row() {
    let mut d = descriptor::<ArticleRating>(SliceKind::Select);
    d.set_partition_components(ints(&[1])).unwrap();
    d.apply_matching_shortcut(MatchingShortcut::One, ints(&[3]))
        .unwrap();

    let slice = d.resolve().unwrap();

    assert_eq!(slice.limit, Some(1));
    assert_eq!(
        slice.slice_bound(CompareOp::Gte),
        Some(&Restriction::Slice {
            columns: vec!["rating"],
            op: CompareOp::Gte,
            values: ints(&[3]),
        })
    );
    assert!(slice.slice_bound(CompareOp::Lte).is_some());
}

#[test]
fn resolved_slice_explains_itself() {
    let mut d = descriptor::<ArticleRating>(SliceKind::Select);
    d.set_partition_components(ints(&[42])).unwrap();
    d.set_from_clusterings(ints(&[2])).unwrap();
    d.set_to_clusterings(ints(&[4])).unwrap();
    d.set_bounding(BoundingMode::ExclusiveBounds);
    d.set_limit(20).unwrap();

    assert_eq!(
        d.resolve().unwrap().to_string(),
        "select FROM article_rating WHERE article_id = 42 AND rating > 2 AND rating < 4 \
         ORDER BY rating ASC LIMIT 20 CONSISTENCY ONE"
    );
}
