//! Property-based tests for pagination arithmetic

use proptest::prelude::*;

use scriptorium::pagination::{Page, PageQuery, MAX_PAGE_SIZE};

proptest! {
    #[test]
    fn test_size_always_in_bounds(page in 0u32..1000, size in proptest::option::of(0u32..10_000)) {
        let query = PageQuery { page, size };
        let effective = query.size();
        prop_assert!(effective >= 1);
        prop_assert!(effective <= MAX_PAGE_SIZE);
    }

    #[test]
    fn test_offset_is_page_times_size(page in any::<u32>(), size in proptest::option::of(1u32..=100)) {
        let query = PageQuery { page, size };
        prop_assert_eq!(query.offset(), u64::from(page) * u64::from(query.size()));
    }

    #[test]
    fn test_from_sorted_never_exceeds_size(
        total in 0usize..500,
        page in 0u32..50,
        size in proptest::option::of(1u32..=100),
    ) {
        let query = PageQuery { page, size };
        let all: Vec<usize> = (0..total).collect();
        let result = Page::from_sorted(all, query);

        prop_assert!(result.items.len() <= result.size as usize);
        prop_assert_eq!(result.total, total as u64);
    }

    #[test]
    fn test_from_sorted_pages_partition_the_input(
        total in 0usize..200,
        size in 1u32..=50,
    ) {
        let all: Vec<usize> = (0..total).collect();
        let mut collected = Vec::new();

        for page in 0..((total as u32 / size) + 2) {
            let query = PageQuery { page, size: Some(size) };
            collected.extend(Page::from_sorted(all.clone(), query).items);
        }

        prop_assert_eq!(collected, all);
    }
}
