/// Property tests for rpm version ordering
use distro_diff::prelude::*;
use proptest::prelude::*;
use std::cmp::Ordering;

fn label() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[0-9a-zA-Z]{1,4}([.~^_+-][0-9a-zA-Z]{1,4}){0,3}").unwrap()
}

fn key() -> impl Strategy<Value = VersionKey> {
    (0i64..3, label(), label()).prop_map(|(epoch, version, release)| VersionKey::new(epoch, version, release))
}

proptest! {
    #[test]
    fn comparison_is_reflexive(a in key()) {
        prop_assert_eq!(VersionComparator::compare(&a, &a), Ordering::Equal);
    }

    #[test]
    fn comparison_is_antisymmetric(a in key(), b in key()) {
        prop_assert_eq!(
            VersionComparator::compare(&a, &b),
            VersionComparator::compare(&b, &a).reverse()
        );
    }

    #[test]
    fn comparison_is_transitive(a in key(), b in key(), c in key()) {
        let mut keys = [a, b, c];
        keys.sort_by(VersionComparator::compare);
        prop_assert_ne!(VersionComparator::compare(&keys[0], &keys[1]), Ordering::Greater);
        prop_assert_ne!(VersionComparator::compare(&keys[1], &keys[2]), Ordering::Greater);
        prop_assert_ne!(VersionComparator::compare(&keys[0], &keys[2]), Ordering::Greater);
    }

    #[test]
    fn labels_antisymmetric(a in label(), b in label()) {
        prop_assert_eq!(
            VersionComparator::compare_labels(&a, &b),
            VersionComparator::compare_labels(&b, &a).reverse()
        );
    }
}
