//! Client-side joins between independently fetched collections.
//!
//! Foreign keys are compared as trimmed strings, since one side is often
//! numeric (`LaunchProvider::spacedevs_id`) and the other text
//! (`LaunchEvent::spacedevs_id`). A missing match is an ordinary outcome.
//! Nothing here is cached; callers recompute from the current collections.

use std::collections::{HashMap, HashSet};

use crate::models::{LaunchEvent, LaunchProvider, Mission};

fn normalize(key: &str) -> Option<String> {
    let key = key.trim();
    if key.is_empty() {
        None
    } else {
        Some(key.to_string())
    }
}

/// Pair each primary record with the secondary record whose `key` equals its
/// `foreign_key`. When several secondary records share a key, the first wins.
pub fn resolve<'a, P, S, FK, SK>(
    primary: &'a [P],
    secondary: &'a [S],
    foreign_key: FK,
    key: SK,
) -> Vec<(&'a P, Option<&'a S>)>
where
    FK: Fn(&P) -> Option<String>,
    SK: Fn(&S) -> Option<String>,
{
    let mut index: HashMap<String, &S> = HashMap::with_capacity(secondary.len());
    for record in secondary {
        if let Some(k) = key(record).as_deref().and_then(normalize) {
            index.entry(k).or_insert(record);
        }
    }

    primary
        .iter()
        .map(|record| {
            let matched = foreign_key(record)
                .as_deref()
                .and_then(normalize)
                .and_then(|fk| index.get(&fk).copied());
            (record, matched)
        })
        .collect()
}

fn event_provider_key(event: &LaunchEvent) -> Option<String> {
    event.spacedevs_id.clone()
}

fn provider_key(provider: &LaunchProvider) -> Option<String> {
    provider.spacedevs_id.map(|id| id.to_string())
}

/// Each event with its launch provider, if known
pub fn providers_for_events<'a>(
    events: &'a [LaunchEvent],
    providers: &'a [LaunchProvider],
) -> Vec<(&'a LaunchEvent, Option<&'a LaunchProvider>)> {
    resolve(events, providers, event_provider_key, provider_key)
}

pub fn provider_for_event<'a>(
    event: &LaunchEvent,
    providers: &'a [LaunchProvider],
) -> Option<&'a LaunchProvider> {
    let wanted = event_provider_key(event).as_deref().and_then(normalize)?;
    providers
        .iter()
        .find(|p| provider_key(p).as_deref().and_then(normalize).as_ref() == Some(&wanted))
}

/// Providers with at least one event among `events`, in provider order
pub fn active_providers(providers: &[LaunchProvider], events: &[LaunchEvent]) -> Vec<LaunchProvider> {
    let active: HashSet<String> = events
        .iter()
        .filter_map(|e| event_provider_key(e).as_deref().and_then(normalize))
        .collect();
    providers
        .iter()
        .filter(|p| {
            provider_key(p)
                .as_deref()
                .and_then(normalize)
                .is_some_and(|k| active.contains(&k))
        })
        .cloned()
        .collect()
}

/// Events launched by `provider`, in event order
pub fn events_for_provider<'a>(
    provider: &LaunchProvider,
    events: &'a [LaunchEvent],
) -> Vec<&'a LaunchEvent> {
    let Some(wanted) = provider_key(provider).as_deref().and_then(normalize) else {
        return Vec::new();
    };
    events
        .iter()
        .filter(|e| event_provider_key(e).as_deref().and_then(normalize).as_ref() == Some(&wanted))
        .collect()
}

/// The mission an event belongs to, preferring the backend's expansion
pub fn mission_for_event<'a>(event: &'a LaunchEvent, missions: &'a [Mission]) -> Option<&'a Mission> {
    if let Some(expanded) = event.expanded_mission() {
        return Some(expanded);
    }
    let wanted = event.linked_mission_id().and_then(normalize)?;
    missions.iter().find(|m| m.id == wanted)
}

/// Missions paired with their events. Missions without events are omitted.
pub fn missions_with_events<'a>(
    missions: &'a [Mission],
    events: &'a [LaunchEvent],
) -> Vec<(&'a Mission, Vec<&'a LaunchEvent>)> {
    let mut grouped: HashMap<String, Vec<&LaunchEvent>> = HashMap::new();
    for event in events {
        if let Some(id) = event.linked_mission_id().and_then(normalize) {
            grouped.entry(id).or_default().push(event);
        }
    }

    missions
        .iter()
        .filter_map(|mission| grouped.remove(&mission.id).map(|evs| (mission, evs)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn event(id: &str, spacedevs: Option<&str>, mission: Option<&str>) -> LaunchEvent {
        serde_json::from_value(json!({
            "id": id,
            "title": id,
            "datetime": "2025-03-01T00:00:00Z",
            "spacedevs_id": spacedevs,
            "mission_id": mission,
        }))
        .unwrap()
    }

    fn provider(id: &str, spacedevs: Option<i64>) -> LaunchProvider {
        serde_json::from_value(json!({"id": id, "name": id, "spacedevs_id": spacedevs})).unwrap()
    }

    fn mission(id: &str) -> Mission {
        Mission {
            id: id.into(),
            name: id.to_uppercase(),
            description: None,
            orbit: None,
        }
    }

    #[test]
    fn test_numeric_and_text_keys_match() {
        let events = vec![event("e1", Some("121"), None), event("e2", Some(" 44 "), None)];
        let providers = vec![provider("spacex", Some(121)), provider("nasa", Some(44))];
        let joined = providers_for_events(&events, &providers);
        assert_eq!(joined[0].1.map(|p| p.id.as_str()), Some("spacex"));
        assert_eq!(joined[1].1.map(|p| p.id.as_str()), Some("nasa"));
    }

    #[test]
    fn test_unmatched_key_is_none_not_failure() {
        let events = vec![
            event("e1", Some("999"), None),
            event("e2", None, None),
            event("e3", Some("121"), None),
        ];
        let providers = vec![provider("spacex", Some(121))];
        let joined = providers_for_events(&events, &providers);
        assert_eq!(joined.len(), 3);
        assert!(joined[0].1.is_none());
        assert!(joined[1].1.is_none());
        assert!(joined[2].1.is_some());
        assert!(provider_for_event(&events[0], &providers).is_none());
        assert_eq!(provider_for_event(&events[2], &providers).unwrap().id, "spacex");
    }

    #[test]
    fn test_first_secondary_wins_on_duplicate_keys() {
        let events = vec![event("e1", Some("1"), None)];
        let providers = vec![provider("first", Some(1)), provider("second", Some(1))];
        assert_eq!(providers_for_events(&events, &providers)[0].1.unwrap().id, "first");
    }

    #[test]
    fn test_active_providers_and_their_events() {
        let events = vec![event("e1", Some("121"), None), event("e2", Some("121"), None)];
        let providers = vec![
            provider("idle", Some(7)),
            provider("spacex", Some(121)),
            provider("unknown", None),
        ];
        let active = active_providers(&providers, &events);
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, "spacex");
        assert_eq!(events_for_provider(&providers[1], &events).len(), 2);
        assert!(events_for_provider(&providers[2], &events).is_empty());
    }

    #[test]
    fn test_missions_grouped_with_events() {
        let missions = vec![mission("m1"), mission("m2"), mission("m3")];
        let events = vec![
            event("e1", None, Some("m2")),
            event("e2", None, Some("m1")),
            event("e3", None, Some("m2")),
            event("e4", None, Some("")),
        ];
        let grouped = missions_with_events(&missions, &events);
        let summary: Vec<(&str, Vec<&str>)> = grouped
            .iter()
            .map(|(m, evs)| (m.id.as_str(), evs.iter().map(|e| e.id.as_str()).collect()))
            .collect();
        assert_eq!(summary, vec![("m1", vec!["e2"]), ("m2", vec!["e1", "e3"])]);
    }

    #[test]
    fn test_mission_for_event() {
        let missions = vec![mission("m1")];
        assert_eq!(mission_for_event(&event("e", None, Some("m1")), &missions).unwrap().id, "m1");
        assert!(mission_for_event(&event("e", None, Some("zz")), &missions).is_none());
        assert!(mission_for_event(&event("e", None, None), &missions).is_none());
    }
}
