/// Property tests for index name derivation and type keys
///
/// Run with: cargo test --test index_names_properties
use chrono::{DateTime, Duration, TimeZone, Utc};
use diagsource::source::{format_round_trip, parse_offset_point};
use diagsource::{DiagnosticsSource, DynamicEntity, fields};
use proptest::prelude::*;

fn instant(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).unwrap()
}

// 2000-01-01 .. 2100-01-01
fn any_now() -> impl Strategy<Value = DateTime<Utc>> {
    (946_684_800i64..4_102_444_800i64).prop_map(instant)
}

proptest! {
    #[test]
    fn override_always_wins(now in any_now(), name in "[a-z]{1,12}", cursor in ".*") {
        let mut entity = DynamicEntity::new("pk", "rk")
            .with(fields::INDEX_NAME, name.clone())
            .with(fields::LAST_OFFSET_POINT, cursor);
        let mut source = DiagnosticsSource::new(&mut entity);

        prop_assert_eq!(source.get_index_names_at(now, 7).unwrap(), vec![name]);
    }

    #[test]
    fn missing_cursor_is_initialised_within_window(now in any_now(), days in 0i64..60) {
        let mut entity = DynamicEntity::new("pk", "rk");
        let mut source = DiagnosticsSource::new(&mut entity);
        source.get_index_names_at(now, days).unwrap();

        let cursor = source.last_offset_point().unwrap();
        prop_assert!(!cursor.is_empty());
        let parsed = parse_offset_point(&cursor).unwrap();
        prop_assert_eq!(parsed, now - Duration::days(days));
    }

    #[test]
    fn buckets_are_descending_and_cover_cursor(now in any_now(), back_minutes in 0i64..(90 * 24 * 60)) {
        let cursor = now - Duration::minutes(back_minutes);
        let mut entity = DynamicEntity::new("pk", "rk")
            .with(fields::LAST_OFFSET_POINT, format_round_trip(&cursor.fixed_offset()));
        let mut source = DiagnosticsSource::new(&mut entity);

        let names = source.get_index_names_at(now, 7).unwrap();
        let expected_len = back_minutes / (24 * 60) + 2;
        prop_assert_eq!(names.len() as i64, expected_len);

        let tomorrow = (now + Duration::days(1)).format("%Y%m%d").to_string();
        prop_assert_eq!(&names[0], &tomorrow);
        prop_assert!(names.windows(2).all(|pair| pair[0] > pair[1]));
    }

    #[test]
    fn far_future_cursor_yields_nothing(now in any_now(), ahead_days in 2i64..365) {
        let cursor = now + Duration::days(ahead_days);
        let mut entity = DynamicEntity::new("pk", "rk")
            .with(fields::LAST_OFFSET_POINT, format_round_trip(&cursor.fixed_offset()));
        let mut source = DiagnosticsSource::new(&mut entity);

        prop_assert!(source.get_index_names_at(now, 7).unwrap().is_empty());
    }

    #[test]
    fn type_key_ignores_custom_attributes(
        pk in "[a-z0-9]{1,8}",
        rk in "[a-z0-9]{1,8}",
        attributes in ".*",
    ) {
        let mut entity = DynamicEntity::new(pk.clone(), rk.clone());
        let mut source = DiagnosticsSource::new(&mut entity);
        let before = source.to_type_key();

        source.set_property(fields::CUSTOM_ATTRIBUTES, attributes);
        prop_assert_eq!(source.to_type_key(), before.clone());
        prop_assert_eq!(before, format!("{}_{}", pk, rk));
    }
}
