use chrono::Duration;
use hullguard_core::{CleaningEvent, Coordinates, StopEpisode};

/// Port gazetteer entry used as the last geolocation fallback.
#[derive(Debug, Clone)]
pub struct NamedPort {
    pub name: String,
    pub position: Coordinates,
}

impl NamedPort {
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            position: Coordinates {
                latitude,
                longitude,
            },
        }
    }
}

/// Per-vessel context the resolver strategies draw on.
pub struct CleaningContext<'a> {
    pub stops: &'a [StopEpisode],
    pub ports: &'a [NamedPort],
}

/// One strategy for geolocating a cleaning event. Strategies return `None`
/// to pass the event on to the next in the chain.
pub trait CleaningSiteResolver: Send + Sync {
    fn resolve(&self, event: &CleaningEvent, ctx: &CleaningContext<'_>) -> Option<Coordinates>;
}

/// Uses the position recorded on the event itself, when it is usable.
#[derive(Default)]
pub struct RecordedPosition;

impl CleaningSiteResolver for RecordedPosition {
    fn resolve(&self, event: &CleaningEvent, _ctx: &CleaningContext<'_>) -> Option<Coordinates> {
        event.position.filter(Coordinates::is_valid)
    }
}

/// Falls back to the centroid of the dwell episode closest in time, within
/// a bounded offset. Hull cleanings happen while the vessel lies still, so a
/// nearby stop is a good surrogate position.
pub struct NearbyStop {
    pub max_offset: Duration,
}

impl Default for NearbyStop {
    fn default() -> Self {
        Self {
            max_offset: Duration::hours(12),
        }
    }
}

impl NearbyStop {
    fn offset_minutes(event: &CleaningEvent, stop: &StopEpisode) -> i64 {
        if stop.period.contains(event.timestamp) {
            return 0;
        }

        (stop.period.start() - event.timestamp)
            .num_minutes()
            .abs()
            .min((stop.period.end() - event.timestamp).num_minutes().abs())
    }
}

impl CleaningSiteResolver for NearbyStop {
    fn resolve(&self, event: &CleaningEvent, ctx: &CleaningContext<'_>) -> Option<Coordinates> {
        ctx.stops
            .iter()
            .map(|stop| (Self::offset_minutes(event, stop), stop))
            .filter(|(offset, _)| *offset <= self.max_offset.num_minutes())
            .min_by_key(|(offset, _)| *offset)
            .map(|(_, stop)| stop.centroid)
    }
}

/// Final fallback: a case-insensitive match of the event's port name against
/// the gazetteer.
#[derive(Default)]
pub struct PortLookup;

impl CleaningSiteResolver for PortLookup {
    fn resolve(&self, event: &CleaningEvent, ctx: &CleaningContext<'_>) -> Option<Coordinates> {
        let name = event.port_name.as_deref()?;

        ctx.ports
            .iter()
            .find(|port| port.name.eq_ignore_ascii_case(name))
            .map(|port| port.position)
    }
}

/// Ordered resolver chain; the first strategy returning a coordinate wins.
pub struct CleaningSiteLocator {
    resolvers: Vec<Box<dyn CleaningSiteResolver>>,
}

impl Default for CleaningSiteLocator {
    fn default() -> Self {
        Self::new(vec![
            Box::new(RecordedPosition),
            Box::new(NearbyStop::default()),
            Box::new(PortLookup),
        ])
    }
}

impl CleaningSiteLocator {
    pub fn new(resolvers: Vec<Box<dyn CleaningSiteResolver>>) -> Self {
        Self { resolvers }
    }

    pub fn locate(&self, event: &CleaningEvent, ctx: &CleaningContext<'_>) -> Option<Coordinates> {
        self.resolvers.iter().find_map(|r| r.resolve(event, ctx))
    }
}

/// Ports the monitored fleet calls at.
pub fn brazil_ports() -> Vec<NamedPort> {
    vec![
        NamedPort::new("Suape", -8.39, -34.96),
        NamedPort::new("Salvador", -12.97, -38.52),
        NamedPort::new("Vitória", -20.32, -40.33),
        NamedPort::new("Rio de Janeiro", -22.89, -43.17),
        NamedPort::new("Santos", -23.98, -46.3),
        NamedPort::new("Rio Grande", -32.12, -52.1),
    ]
}
