//! Property-based tests for the tab store.
//!
//! A plain `Vec` model is driven alongside the store through random insert,
//! update, upsert and remove sequences; after every step the two must agree
//! on ids, order and merged fields.

use proptest::prelude::*;

use tabstate::state::tab_state;
use tabstate::types::identity::TabId;
use tabstate::types::state::AppState;
use tabstate::types::tab::{TabPatch, TabRecord};

#[derive(Debug, Clone)]
enum TabOp {
    Insert,
    Title(usize, String),
    Mute(usize, bool),
    Remove(usize),
    /// Reassign the live id of an existing record through its uuid.
    Reassign(usize),
    UpdateMissing,
}

fn arb_tab_ops() -> impl Strategy<Value = Vec<TabOp>> {
    prop::collection::vec(
        prop_oneof![
            4 => Just(TabOp::Insert),
            2 => (0..20usize, "[a-z]{1,8}").prop_map(|(i, t)| TabOp::Title(i, t)),
            2 => (0..20usize, any::<bool>()).prop_map(|(i, m)| TabOp::Mute(i, m)),
            2 => (0..20usize).prop_map(TabOp::Remove),
            1 => (0..20usize).prop_map(TabOp::Reassign),
            1 => Just(TabOp::UpdateMissing),
        ],
        1..60,
    )
}

#[derive(Debug, Clone, PartialEq)]
struct ModelTab {
    tab_id: TabId,
    uuid: String,
    title: Option<String>,
    muted: Option<bool>,
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(40))]

    #[test]
    fn store_matches_model(ops in arb_tab_ops()) {
        let mut state = AppState::new();
        let mut model: Vec<ModelTab> = Vec::new();
        let mut next_id = 1;

        for op in &ops {
            match op {
                TabOp::Insert => {
                    let uuid = format!("uuid-{next_id}");
                    state = tab_state::insert_tab(&state, TabRecord {
                        uuid: Some(uuid.clone()),
                        ..TabRecord::placeholder(TabId(next_id))
                    });
                    model.push(ModelTab { tab_id: TabId(next_id), uuid, title: None, muted: None });
                    next_id += 1;
                }
                TabOp::Title(idx, title) => {
                    if model.is_empty() { continue; }
                    let pick = idx % model.len();
                    state = tab_state::update_tab(&state, TabPatch {
                        title: Some(title.clone()),
                        ..TabPatch::for_tab(model[pick].tab_id)
                    });
                    model[pick].title = Some(title.clone());
                }
                TabOp::Mute(idx, muted) => {
                    if model.is_empty() { continue; }
                    let pick = idx % model.len();
                    state = tab_state::update_tab(&state, TabPatch {
                        audio_muted: Some(*muted),
                        ..TabPatch::for_tab(model[pick].tab_id)
                    });
                    model[pick].muted = Some(*muted);
                }
                TabOp::Remove(idx) => {
                    if model.is_empty() { continue; }
                    let pick = idx % model.len();
                    let before = state.tabs().len();
                    state = tab_state::remove_tab_by_tab_id(&state, model[pick].tab_id);
                    prop_assert_eq!(state.tabs().len(), before - 1);
                    model.remove(pick);
                }
                TabOp::Reassign(idx) => {
                    if model.is_empty() { continue; }
                    let pick = idx % model.len();
                    let fresh = TabId(next_id);
                    next_id += 1;
                    state = tab_state::upsert_tab(&state, TabRecord {
                        uuid: Some(model[pick].uuid.clone()),
                        ..TabRecord::placeholder(fresh)
                    });
                    model[pick].tab_id = fresh;
                }
                TabOp::UpdateMissing => {
                    let before = state.clone();
                    state = tab_state::update_tab(&state, TabPatch {
                        title: Some("nobody".to_string()),
                        ..TabPatch::for_tab(TabId(next_id + 1000))
                    });
                    prop_assert_eq!(&state, &before);
                }
            }

            let actual: Vec<ModelTab> = state
                .tabs()
                .iter()
                .map(|t| ModelTab {
                    tab_id: t.tab_id.unwrap_or(TabId::UNASSIGNED),
                    uuid: t.uuid.clone().unwrap_or_default(),
                    title: t.title.clone(),
                    muted: t.audio_muted,
                })
                .collect();
            prop_assert_eq!(&actual, &model, "after {:?}", op);
        }
    }

    /// Disjoint field updates merge regardless of the order they arrive in.
    #[test]
    fn disjoint_updates_commute(title in "[a-z]{1,12}", muted in any::<bool>(), url in "https://[a-z]{1,8}\\.test/") {
        let base = tab_state::insert_tab(&AppState::new(), TabRecord {
            uuid: Some("u".to_string()),
            ..TabRecord::placeholder(TabId(1))
        });
        let patches = [
            TabPatch { title: Some(title.clone()), ..TabPatch::for_tab(TabId(1)) },
            TabPatch { audio_muted: Some(muted), ..TabPatch::for_tab(TabId(1)) },
            TabPatch { url: Some(url.clone()), ..TabPatch::for_tab(TabId(1)) },
        ];

        let forward = patches
            .iter()
            .fold(base.clone(), |s, p| tab_state::update_tab(&s, p.clone()));
        let backward = patches
            .iter()
            .rev()
            .fold(base, |s, p| tab_state::update_tab(&s, p.clone()));

        prop_assert_eq!(&forward, &backward);
        let tab = tab_state::get_by_tab_id(&forward, TabId(1)).unwrap();
        prop_assert_eq!(tab.title.as_deref(), Some(title.as_str()));
        prop_assert_eq!(tab.audio_muted, Some(muted));
        prop_assert_eq!(tab.url.as_deref(), Some(url.as_str()));
        prop_assert_eq!(tab.uuid.as_deref(), Some("u"));
    }
}
