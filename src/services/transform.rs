//! List transformer
//!
//! Pure functions over app lists: filter by system flag, free-text search and
//! the nine sort orderings. All sorts are stable, so records with equal keys
//! keep their input order and repeated calls give identical results.

use std::cmp::Reverse;

use crate::models::{AppRecord, FilterMode, SortMode};

/// Keep the records matching a filter mode
pub fn filter_apps(apps: &[AppRecord], mode: FilterMode) -> Vec<AppRecord> {
    match mode {
        FilterMode::All => apps.to_vec(),
        FilterMode::UserOnly => apps.iter().filter(|a| !a.is_system_app).cloned().collect(),
        FilterMode::SystemOnly => apps.iter().filter(|a| a.is_system_app).cloned().collect(),
    }
}

/// Case-insensitive substring match on display name or package identifier
///
/// A blank query returns the input unchanged.
pub fn search_apps(apps: &[AppRecord], query: &str) -> Vec<AppRecord> {
    let query = query.trim();
    if query.is_empty() {
        return apps.to_vec();
    }

    let needle = query.to_lowercase();
    apps.iter()
        .filter(|a| {
            a.app_name.to_lowercase().contains(&needle)
                || a.package_name.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

/// Order records by a sort mode
pub fn sort_apps(apps: &[AppRecord], mode: SortMode) -> Vec<AppRecord> {
    let mut sorted = apps.to_vec();

    match mode {
        SortMode::NameAsc => sorted.sort_by_cached_key(|a| a.app_name.to_lowercase()),
        SortMode::NameDesc => sorted.sort_by_cached_key(|a| Reverse(a.app_name.to_lowercase())),
        SortMode::InstallDateNewest => sorted.sort_by_key(|a| Reverse(a.install_time_millis)),
        SortMode::InstallDateOldest => sorted.sort_by_key(|a| a.install_time_millis),
        SortMode::UpdateDateNewest => sorted.sort_by_key(|a| Reverse(a.update_time_millis)),
        SortMode::UpdateDateOldest => sorted.sort_by_key(|a| a.update_time_millis),
        SortMode::SizeLargest => sorted.sort_by_key(|a| Reverse(a.apk_size_bytes)),
        SortMode::SizeSmallest => sorted.sort_by_key(|a| a.apk_size_bytes),
        SortMode::PackageName => sorted.sort_by_cached_key(|a| a.package_name.to_lowercase()),
    }

    sorted
}

/// Filter, then search, then sort
pub fn transform(
    apps: &[AppRecord],
    filter: FilterMode,
    query: &str,
    sort: SortMode,
) -> Vec<AppRecord> {
    let filtered = filter_apps(apps, filter);
    let searched = search_apps(&filtered, query);
    sort_apps(&searched, sort)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(apps: &[AppRecord]) -> Vec<&str> {
        apps.iter().map(|a| a.app_name.as_str()).collect()
    }

    fn example() -> Vec<AppRecord> {
        vec![
            AppRecord::new("a.b", "Beta").with_times(100, 300).with_size(2048),
            AppRecord::new("a.c", "alpha").with_times(50, 400).with_size(1024),
        ]
    }

    fn mixed() -> Vec<AppRecord> {
        vec![
            AppRecord::new("org.example.maps", "Maps").with_size(10),
            AppRecord::new("com.android.settings", "Settings").system().with_size(10),
            AppRecord::new("org.example.camera", "Camera").with_size(30),
            AppRecord::new("com.android.phone", "Phone").system().with_size(20),
            AppRecord::new("org.example.mail", "mail").with_size(10),
        ]
    }

    #[test]
    fn test_example_sorts() {
        let apps = example();
        assert_eq!(names(&sort_apps(&apps, SortMode::NameAsc)), vec!["alpha", "Beta"]);
        assert_eq!(names(&sort_apps(&apps, SortMode::NameDesc)), vec!["Beta", "alpha"]);
        assert_eq!(names(&sort_apps(&apps, SortMode::SizeLargest)), vec!["Beta", "alpha"]);
        assert_eq!(names(&sort_apps(&apps, SortMode::SizeSmallest)), vec!["alpha", "Beta"]);
        assert_eq!(
            names(&sort_apps(&apps, SortMode::InstallDateNewest)),
            vec!["Beta", "alpha"]
        );
        assert_eq!(
            names(&sort_apps(&apps, SortMode::InstallDateOldest)),
            vec!["alpha", "Beta"]
        );
        assert_eq!(
            names(&sort_apps(&apps, SortMode::UpdateDateNewest)),
            vec!["alpha", "Beta"]
        );
        assert_eq!(
            names(&sort_apps(&apps, SortMode::UpdateDateOldest)),
            vec!["Beta", "alpha"]
        );
        assert_eq!(names(&sort_apps(&apps, SortMode::PackageName)), vec!["Beta", "alpha"]);
    }

    #[test]
    fn test_filter_partitions_the_list() {
        let apps = mixed();
        let system = filter_apps(&apps, FilterMode::SystemOnly);
        let user = filter_apps(&apps, FilterMode::UserOnly);

        assert_eq!(system.len() + user.len(), apps.len());
        assert!(system.iter().all(|a| a.is_system_app));
        assert!(user.iter().all(|a| !a.is_system_app));
        assert!(system
            .iter()
            .all(|s| !user.iter().any(|u| u.package_name == s.package_name)));
        assert_eq!(filter_apps(&apps, FilterMode::All), apps);
    }

    #[test]
    fn test_search_matches_name_or_package() {
        let apps = mixed();

        assert_eq!(names(&search_apps(&apps, "MA")), vec!["Maps", "mail"]);
        assert_eq!(names(&search_apps(&apps, "android")), vec!["Settings", "Phone"]);
        assert_eq!(names(&search_apps(&apps, "  camera ")), vec!["Camera"]);
        assert!(search_apps(&apps, "zzz").is_empty());
    }

    #[test]
    fn test_blank_search_is_identity() {
        let apps = mixed();
        assert_eq!(search_apps(&apps, ""), apps);
        assert_eq!(search_apps(&apps, "   \t"), apps);
    }

    #[test]
    fn test_search_is_idempotent() {
        let apps = mixed();
        let once = search_apps(&apps, "example");
        let twice = search_apps(&once, "example");
        assert_eq!(once, twice);
    }

    #[test]
    fn test_sort_is_stable_for_equal_keys() {
        let apps = mixed();

        let by_size = sort_apps(&apps, SortMode::SizeSmallest);
        assert_eq!(names(&by_size), vec!["Maps", "Settings", "mail", "Phone", "Camera"]);

        let by_size = sort_apps(&apps, SortMode::SizeLargest);
        assert_eq!(names(&by_size), vec!["Camera", "Phone", "Maps", "Settings", "mail"]);
    }

    #[test]
    fn test_name_sort_ties_keep_input_order() {
        let apps = vec![
            AppRecord::new("x.one", "Same"),
            AppRecord::new("x.two", "same"),
            AppRecord::new("x.three", "SAME"),
        ];

        let asc = sort_apps(&apps, SortMode::NameAsc);
        let desc = sort_apps(&apps, SortMode::NameDesc);
        let packages = |v: &[AppRecord]| v.iter().map(|a| a.package_name.clone()).collect::<Vec<_>>();

        assert_eq!(packages(&asc), vec!["x.one", "x.two", "x.three"]);
        assert_eq!(packages(&desc), vec!["x.one", "x.two", "x.three"]);
    }

    #[test]
    fn test_transform_is_idempotent() {
        let apps = mixed();
        let once = transform(&apps, FilterMode::UserOnly, "example", SortMode::NameDesc);
        let twice = transform(&once, FilterMode::UserOnly, "example", SortMode::NameDesc);

        assert_eq!(names(&once), vec!["Maps", "mail", "Camera"]);
        assert_eq!(once, twice);
    }
}
