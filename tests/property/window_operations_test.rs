//! Property-based tests for the window store.

use proptest::prelude::*;

use tabstate::state::window_state;
use tabstate::types::identity::WindowId;
use tabstate::types::state::AppState;
use tabstate::types::window::{WindowBounds, WindowRecord};

fn arb_bounds() -> impl Strategy<Value = WindowBounds> {
    (0..2000i32, 0..2000i32, 100..4000i32, 100..3000i32).prop_map(|(x, y, width, height)| {
        WindowBounds {
            x,
            y,
            width,
            height,
        }
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(40))]

    /// Upserting the same live id without a uuid any number of times keeps
    /// one record and the uuid it was first given.
    #[test]
    fn upsert_by_id_is_stable(ids in prop::collection::vec(1..6i32, 1..40), bounds in arb_bounds()) {
        let mut state = AppState::new();
        let mut first_uuids: Vec<(WindowId, String)> = Vec::new();

        for id in &ids {
            let window_id = WindowId(*id);
            state = window_state::upsert_window(&state, WindowRecord {
                bounds: Some(bounds),
                ..WindowRecord::with_id(window_id)
            });
            let uuid = window_state::window_uuid_for_window_id(&state, window_id).unwrap();
            match first_uuids.iter().find(|(w, _)| *w == window_id) {
                Some((_, first)) => prop_assert_eq!(&uuid, first),
                None => first_uuids.push((window_id, uuid)),
            }
        }

        prop_assert_eq!(state.windows().len(), first_uuids.len());
        let order: Vec<WindowId> = state.windows().iter().filter_map(|w| w.window_id).collect();
        let expected: Vec<WindowId> = first_uuids.iter().map(|(w, _)| *w).collect();
        prop_assert_eq!(order, expected);
    }

    /// A window restored by uuid picks up whatever live id it is later
    /// reported under, without being duplicated.
    #[test]
    fn uuid_fallback_adopts_live_id(live in 1..1000i32, uuid in "[a-f0-9]{8}") {
        let state = window_state::add_window(&AppState::new(), WindowRecord {
            window_uuid: Some(uuid.clone()),
            ..WindowRecord::default()
        });
        let state = window_state::upsert_window(&state, WindowRecord {
            window_uuid: Some(uuid.clone()),
            focused: Some(true),
            ..WindowRecord::with_id(WindowId(live))
        });

        prop_assert_eq!(state.windows().len(), 1);
        let window = window_state::get_by_window_id(&state, WindowId(live)).unwrap();
        prop_assert_eq!(window.window_uuid.as_deref(), Some(uuid.as_str()));
        prop_assert_eq!(window.focused, Some(true));
    }
}
