use super::*;
use proptest::prelude::*;

// (mode, physical order, from-operator, to-operator)
const TABLE: [(BoundingMode, ClusteringOrder, CompareOp, CompareOp); 8] = [
    (
        BoundingMode::InclusiveBounds,
        ClusteringOrder::Asc,
        CompareOp::Gte,
        CompareOp::Lte,
    ),
    (
        BoundingMode::ExclusiveBounds,
        ClusteringOrder::Asc,
        CompareOp::Gt,
        CompareOp::Lt,
    ),
    (
        BoundingMode::InclusiveStartBoundOnly,
        ClusteringOrder::Asc,
        CompareOp::Gte,
        CompareOp::Lt,
    ),
    (
        BoundingMode::InclusiveEndBoundOnly,
        ClusteringOrder::Asc,
        CompareOp::Gt,
        CompareOp::Lte,
    ),
    (
        BoundingMode::InclusiveBounds,
        ClusteringOrder::Desc,
        CompareOp::Lte,
        CompareOp::Gte,
    ),
    (
        BoundingMode::ExclusiveBounds,
        ClusteringOrder::Desc,
        CompareOp::Lt,
        CompareOp::Gt,
    ),
    (
        BoundingMode::InclusiveStartBoundOnly,
        ClusteringOrder::Desc,
        CompareOp::Lte,
        CompareOp::Gt,
    ),
    (
        BoundingMode::InclusiveEndBoundOnly,
        ClusteringOrder::Desc,
        CompareOp::Lt,
        CompareOp::Gte,
    ),
];

#[test]
fn bound_operators_match_truth_table() {
    for (mode, physical, from, to) in TABLE {
        assert_eq!(
            mode.resolve(physical),
            BoundOperators { from, to },
            "mode={mode:?} physical={physical:?}"
        );
    }
}

#[test]
fn inclusivity_flags_are_independent() {
    assert!(BoundingMode::InclusiveBounds.inclusive_start());
    assert!(BoundingMode::InclusiveBounds.inclusive_end());
    assert!(!BoundingMode::ExclusiveBounds.inclusive_start());
    assert!(!BoundingMode::ExclusiveBounds.inclusive_end());
    assert!(BoundingMode::InclusiveStartBoundOnly.inclusive_start());
    assert!(!BoundingMode::InclusiveStartBoundOnly.inclusive_end());
    assert!(!BoundingMode::InclusiveEndBoundOnly.inclusive_start());
    assert!(BoundingMode::InclusiveEndBoundOnly.inclusive_end());
}

#[test]
fn ordering_is_flipped_only_on_descending_columns() {
    use OrderingMode::{Ascending, Descending};

    assert_eq!(Ascending.resolve(ClusteringOrder::Asc), Ascending);
    assert_eq!(Descending.resolve(ClusteringOrder::Asc), Descending);
    assert_eq!(Ascending.resolve(ClusteringOrder::Desc), Descending);
    assert_eq!(Descending.resolve(ClusteringOrder::Desc), Ascending);
}

#[test]
fn compare_op_display_is_symbolic() {
    assert_eq!(CompareOp::Gte.to_string(), ">=");
    assert_eq!(CompareOp::Lt.to_string(), "<");
    assert_eq!(OrderingMode::Descending.to_string(), "DESC");
}

fn arb_mode() -> impl Strategy<Value = BoundingMode> {
    prop::sample::select(BoundingMode::ALL.to_vec())
}

fn arb_order() -> impl Strategy<Value = ClusteringOrder> {
    prop_oneof![Just(ClusteringOrder::Asc), Just(ClusteringOrder::Desc)]
}

proptest! {
    #[test]
    fn descending_mirrors_ascending(mode in arb_mode()) {
        let asc = mode.resolve(ClusteringOrder::Asc);
        let desc = mode.resolve(ClusteringOrder::Desc);

        prop_assert_eq!(mirror(asc.from), desc.from);
        prop_assert_eq!(mirror(asc.to), desc.to);
    }

    #[test]
    fn range_operators_admit_value_iff_inclusive(mode in arb_mode(), order in arb_order()) {
        let ops = mode.resolve(order);

        prop_assert_eq!(ops.from.matches(Ordering::Equal), mode.inclusive_start());
        prop_assert_eq!(ops.to.matches(Ordering::Equal), mode.inclusive_end());
    }
}

const fn mirror(op: CompareOp) -> CompareOp {
    match op {
        CompareOp::Lt => CompareOp::Gt,
        CompareOp::Lte => CompareOp::Gte,
        CompareOp::Gt => CompareOp::Lt,
        CompareOp::Gte => CompareOp::Lte,
        other => other,
    }
}
