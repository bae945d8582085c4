use crate::error::{Error, Result};
use crate::models::Station;

mod lithuanian;

/// In-memory, insertion-ordered station directory.
#[derive(Clone, Debug)]
pub struct Catalog {
    stations: Vec<Station>,
}

impl Catalog {
    /// Catalog with the built-in Lithuanian stations.
    pub fn new() -> Self {
        Self {
            stations: lithuanian::stations(),
        }
    }

    pub fn empty() -> Self {
        Self { stations: vec![] }
    }

    /// Builds a catalog from `stations`, rejecting the first duplicate id.
    pub fn with_stations<I>(stations: I) -> Result<Self>
    where
        I: IntoIterator<Item = Station>,
    {
        let mut catalog = Self::empty();

        for station in stations {
            catalog.add(station)?;
        }

        Ok(catalog)
    }

    /// Snapshot of all stations in insertion order.
    pub fn list(&self) -> Vec<Station> {
        self.stations.clone()
    }

    pub fn get(&self, id: &str) -> Option<&Station> {
        self.stations.iter().find(|s| s.id == id)
    }

    /// Case-insensitive substring search over name, genre and description.
    pub fn search(&self, query: &str) -> Vec<&Station> {
        let query = query.to_lowercase();

        self.stations.iter().filter(|s| s.matches(&query)).collect()
    }

    /// Appends `station` unless its id is already taken.
    pub fn add(&mut self, station: Station) -> Result<()> {
        if self.get(&station.id).is_some() {
            return Err(Error::DuplicateId(station.id));
        }

        log::debug!("catalog: added station {}", station.id);
        self.stations.push(station);

        Ok(())
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Station> {
        self.stations.iter()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Station;
    type IntoIter = std::slice::Iter<'a, Station>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::{Catalog, Error, Station};

    const BUILTIN_IDS: [&str; 7] = [
        "zipfm",
        "zipfm-kasete",
        "m1",
        "m1-plius",
        "m1-dance",
        "m1-laluna",
        "m1-lietus",
    ];

    fn ids(stations: &[&Station]) -> Vec<String> {
        stations.iter().map(|s| s.id.clone()).collect()
    }

    fn new_station(id: &str) -> Station {
        Station::new(id, format!("name_{id}"), format!("desc_{id}"), "", "LT")
    }

    #[test]
    fn builtin_stations_in_order() {
        let catalog = Catalog::new();
        let listed: Vec<String> = catalog.list().into_iter().map(|s| s.id).collect();

        assert_eq!(listed, BUILTIN_IDS);
    }

    #[test]
    fn list_is_a_snapshot() {
        let catalog = Catalog::new();

        let mut listed = catalog.list();
        listed.clear();
        listed.push(new_station("intruder"));

        assert_eq!(catalog.len(), 7);
        assert!(catalog.get("intruder").is_none());
        assert_eq!(catalog.list()[0].id, "zipfm");
    }

    #[test]
    fn get() {
        let catalog = Catalog::new();

        for id in BUILTIN_IDS {
            assert_eq!(catalog.get(id).map(|s| s.id.as_str()), Some(id));
        }

        assert!(catalog.get("ZIPFM").is_none());
        assert!(catalog.get("").is_none());
        assert!(catalog.get("lrt").is_none());
    }

    #[test]
    fn search_is_case_insensitive() {
        let catalog = Catalog::new();

        assert_eq!(ids(&catalog.search("ZIP fm")), ["zipfm", "zipfm-kasete"]);
        assert_eq!(
            ids(&catalog.search("house")),
            ["m1-dance"],
            "matches genre"
        );
        assert_eq!(
            ids(&catalog.search("KLAIPĖDA")),
            ["m1-laluna"],
            "matches description"
        );
    }

    #[test]
    fn search_empty_and_missing() {
        let catalog = Catalog::new();

        assert_eq!(ids(&catalog.search("")), BUILTIN_IDS);
        assert!(catalog.search("polka").is_empty());
    }

    #[test]
    fn search_keeps_insertion_order() {
        let catalog = Catalog::new();

        assert_eq!(
            ids(&catalog.search("pop")),
            ["zipfm", "m1", "m1-plius", "m1-laluna", "m1-lietus"]
        );
    }

    #[test]
    fn search_without_genre() {
        let mut catalog = Catalog::empty();
        catalog
            .add(Station::new("talk", "Talk", "news and talk", "", "LT"))
            .unwrap();
        catalog
            .add(new_station("jazz").with_genre("Jazz"))
            .unwrap();

        assert_eq!(ids(&catalog.search("jazz")), ["jazz"]);
        assert_eq!(ids(&catalog.search("news")), ["talk"]);
    }

    #[test]
    fn add() {
        let mut catalog = Catalog::new();

        catalog.add(new_station("lrt")).unwrap();

        assert_eq!(catalog.len(), 8);
        assert_eq!(catalog.get("lrt"), Some(&new_station("lrt")));
        assert_eq!(catalog.list().last().map(|s| s.id.as_str()), Some("lrt"));
    }

    #[test]
    fn add_accepts_empty_fields() {
        let mut catalog = Catalog::empty();

        catalog.add(Station::new("", "", "", "not a url", "")).unwrap();

        assert_eq!(catalog.len(), 1);
        assert!(catalog.get("").is_some());
    }

    #[test]
    fn add_duplicate() {
        let mut catalog = Catalog::new();
        let before = catalog.list();

        let err = catalog.add(new_station("m1")).unwrap_err();

        assert!(matches!(err, Error::DuplicateId(ref id) if id == "m1"));
        assert_eq!(err.to_string(), r#"Station with id "m1" already exists"#);
        assert_eq!(catalog.list(), before);
    }

    #[test]
    fn iterates_by_reference() {
        let catalog = Catalog::new();
        let mut names = vec![];

        for station in &catalog {
            names.push(station.name.as_str());
        }

        assert_eq!(names.len(), catalog.len());
        assert_eq!(names[1], "ZIP FM (Iš Kasetės)");
    }

    #[test]
    fn with_stations_rejects_duplicates() {
        let ok = Catalog::with_stations(vec![new_station("a"), new_station("b")]).unwrap();
        assert_eq!(ok.iter().count(), 2);

        let err = Catalog::with_stations(vec![new_station("a"), new_station("a")]).unwrap_err();
        assert!(matches!(err, Error::DuplicateId(_)));
    }
}
