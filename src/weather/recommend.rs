//! Weather-driven task recommendations

use super::conditions::WeatherSnapshot;
use crate::tasks::{Location, Task, TaskStore};

/// Maximum number of recommended tasks
pub const RECOMMENDATION_LIMIT: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct Recommendations {
    pub outdoor_suitable: bool,
    /// Open tasks matching the favored location, at most three, in store order
    pub tasks: Vec<Task>,
}

impl Recommendations {
    /// Location the current weather favors
    pub fn favored_location(&self) -> Location {
        if self.outdoor_suitable {
            Location::Outdoor
        } else {
            Location::Indoor
        }
    }
}

/// Pick tasks that suit the weather
///
/// Good weather recommends open outdoor tasks, otherwise open indoor tasks.
/// Tasks tagged `any` are never recommended.
pub fn recommend(weather: &WeatherSnapshot, tasks: &[Task]) -> Recommendations {
    let outdoor_suitable = weather.outdoor_suitable();
    let wanted = if outdoor_suitable {
        Location::Outdoor
    } else {
        Location::Indoor
    };

    Recommendations {
        outdoor_suitable,
        tasks: tasks
            .iter()
            .filter(|t| t.is_open() && t.location == wanted)
            .take(RECOMMENDATION_LIMIT)
            .cloned()
            .collect(),
    }
}

/// Keeps the last computed recommendations
///
/// The cached output is reused only while both the store version and the
/// weather snapshot are unchanged.
#[derive(Debug, Default)]
pub struct Recommender {
    last: Option<(u64, WeatherSnapshot, Recommendations)>,
}

impl Recommender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn recommend(&mut self, weather: &WeatherSnapshot, store: &TaskStore) -> Recommendations {
        if let Some((version, snapshot, output)) = &self.last
            && *version == store.version()
            && snapshot == weather
        {
            return output.clone();
        }

        let output = recommend(weather, &store.all());
        self.last = Some((store.version(), weather.clone(), output.clone()));
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::TaskDraft;
    use crate::weather::TemperatureUnit;

    fn sunny() -> WeatherSnapshot {
        WeatherSnapshot {
            weather_code: 0,
            temperature: 22.0,
            unit: TemperatureUnit::Celsius,
            wind_speed: Some(8.0),
            precipitation: 0.0,
            humidity: Some(40.0),
        }
    }

    fn stormy() -> WeatherSnapshot {
        WeatherSnapshot {
            weather_code: 95,
            ..sunny()
        }
    }

    fn mixed_store() -> TaskStore {
        let mut store = TaskStore::new();
        store.add(TaskDraft::new("mow lawn").location(Location::Outdoor));
        store.add(TaskDraft::new("tidy desk").location(Location::Indoor));
        store.add(TaskDraft::new("anything").location(Location::Any));
        store
    }

    #[test]
    fn test_good_weather_recommends_outdoor_only() {
        let store = mixed_store();
        let rec = recommend(&sunny(), &store.all());

        assert!(rec.outdoor_suitable);
        assert_eq!(rec.tasks.len(), 1);
        assert_eq!(rec.tasks[0].text, "mow lawn");
        assert_eq!(rec.favored_location(), Location::Outdoor);
    }

    #[test]
    fn test_bad_weather_recommends_indoor_only() {
        let store = mixed_store();
        let rec = recommend(&stormy(), &store.all());

        assert!(!rec.outdoor_suitable);
        assert_eq!(rec.tasks.len(), 1);
        assert_eq!(rec.tasks[0].text, "tidy desk");
    }

    #[test]
    fn test_limit_and_completed_filter() {
        let mut store = TaskStore::new();
        let done = store
            .add(TaskDraft::new("done outside").location(Location::Outdoor))
            .unwrap();
        store.toggle_completed(done.id);
        for i in 0..5 {
            store.add(TaskDraft::new(format!("outside {}", i)).location(Location::Outdoor));
        }

        let rec = recommend(&sunny(), &store.all());
        assert_eq!(rec.tasks.len(), RECOMMENDATION_LIMIT);
        assert_eq!(rec.tasks[0].text, "outside 0");
    }

    #[test]
    fn test_zero_matches_is_a_valid_result() {
        let mut store = TaskStore::new();
        store.add(TaskDraft::new("anywhere"));
        let rec = recommend(&sunny(), &store.all());
        assert!(rec.tasks.is_empty());
    }

    #[test]
    fn test_recommender_recomputes_on_change() {
        let mut store = mixed_store();
        let mut recommender = Recommender::new();

        let first = recommender.recommend(&sunny(), &store);
        assert_eq!(first.tasks.len(), 1);

        store.add(TaskDraft::new("walk").location(Location::Outdoor));
        let second = recommender.recommend(&sunny(), &store);
        assert_eq!(second.tasks.len(), 2);

        let third = recommender.recommend(&stormy(), &store);
        assert!(!third.outdoor_suitable);
        assert_eq!(third.tasks[0].text, "tidy desk");
    }
}
