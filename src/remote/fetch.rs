use super::cache::StructureCache;
use super::error::FetchError;
use super::source::StructureSource;
use crate::io::{ConvertOptions, convert_mmcif_to_pdb};

const MAX_COMPONENT_ID_LEN: usize = 5;

/// Checks that `raw` looks like a chemical component id and returns it upper-cased.
///
/// # Errors
///
/// Returns [`FetchError::InvalidComponentId`] unless `raw` is 1 to 5 ASCII letters or digits.
pub fn validate_component_id(raw: &str) -> Result<String, FetchError> {
    let trimmed = raw.trim();
    let valid = !trimmed.is_empty()
        && trimmed.len() <= MAX_COMPONENT_ID_LEN
        && trimmed.chars().all(|c| c.is_ascii_alphanumeric());

    if valid {
        Ok(trimmed.to_ascii_uppercase())
    } else {
        Err(FetchError::InvalidComponentId(raw.to_string()))
    }
}

/// Resolves a component id to the first entry the search service ranks for it.
///
/// # Errors
///
/// Returns [`FetchError::NotFound`] when the search yields no entries, or any error the
/// source reports.
pub async fn resolve_entry<S: StructureSource>(
    source: &S,
    component_id: &str,
) -> Result<String, FetchError> {
    source
        .search_entries(component_id)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| FetchError::not_found(component_id))
}

/// Resolves, downloads, and converts the ligand `component_id` into PDB text.
///
/// The id is validated before any remote call. Remote calls run sequentially: search,
/// then fetch.
///
/// # Errors
///
/// Returns [`FetchError::InvalidComponentId`] for a malformed id, [`FetchError::NotFound`]
/// when no entry carries the component or the fetch comes back empty,
/// [`FetchError::Network`] for transport failures, and [`FetchError::MalformedData`] when
/// the downloaded markup cannot be converted.
pub async fn fetch_structure<S: StructureSource>(
    source: &S,
    component_id: &str,
    options: &ConvertOptions,
) -> Result<String, FetchError> {
    let component_id = validate_component_id(component_id)?;

    let entry_id = resolve_entry(source, &component_id).await?;
    log::debug!("Component {component_id} resolved to entry {entry_id}");

    let mmcif = source.fetch_ligand(&entry_id, &component_id).await?;
    if mmcif.trim().is_empty() {
        return Err(FetchError::not_found(component_id));
    }

    let pdb = convert_mmcif_to_pdb(&mmcif, options)?;
    log::info!(
        "Converted {component_id} from entry {entry_id} ({} bytes of mmCIF)",
        mmcif.len()
    );

    Ok(pdb)
}

/// [`fetch_structure`] with a cache lookup in front of the remote calls.
///
/// Entries are keyed by component id and conversion options, so one cache can serve
/// callers that differ in `include_conect`. Only successful conversions are cached;
/// failures are retried on the next request.
pub async fn fetch_structure_cached<S: StructureSource>(
    source: &S,
    cache: &StructureCache,
    component_id: &str,
    options: &ConvertOptions,
) -> Result<String, FetchError> {
    let component_id = validate_component_id(component_id)?;
    let key = cache_key(&component_id, options);

    if let Some(pdb) = cache.get(&key) {
        log::debug!("Cache hit for {key}");
        return Ok(pdb);
    }

    let pdb = fetch_structure(source, &component_id, options).await?;
    cache.insert(&key, pdb.clone());

    Ok(pdb)
}

fn cache_key(component_id: &str, options: &ConvertOptions) -> String {
    let variant = if options.include_conect {
        "conect"
    } else {
        "plain"
    };
    format!("{component_id}/{variant}")
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::io::read_pdb_str;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    pub(crate) const ATP_SINGLE_ATOM: &str = "\
data_3W2S
loop_
_atom_site.group_PDB
_atom_site.id
_atom_site.type_symbol
_atom_site.label_atom_id
_atom_site.label_comp_id
_atom_site.auth_asym_id
_atom_site.auth_seq_id
_atom_site.Cartn_x
_atom_site.Cartn_y
_atom_site.Cartn_z
_atom_site.occupancy
_atom_site.B_iso_or_equiv
HETATM 1 P PG ATP A 401 12.345 -6.789 10.111 1.00 30.25
#
";

    /// In-memory catalogue: component id to ranked entries, entry id to markup.
    #[derive(Default)]
    pub(crate) struct MockSource {
        pub(crate) entries: HashMap<String, Vec<String>>,
        pub(crate) ligands: HashMap<String, String>,
        pub(crate) fail_search: bool,
        pub(crate) searches: AtomicUsize,
    }

    impl MockSource {
        pub(crate) fn atp() -> Self {
            let mut source = Self::default();
            source
                .entries
                .insert("ATP".into(), vec!["3W2S".into(), "1A49".into()]);
            source
                .ligands
                .insert("3W2S".into(), ATP_SINGLE_ATOM.to_string());
            source
        }

        pub(crate) fn search_count(&self) -> usize {
            self.searches.load(Ordering::SeqCst)
        }
    }

    impl StructureSource for MockSource {
        async fn search_entries(&self, component_id: &str) -> Result<Vec<String>, FetchError> {
            self.searches.fetch_add(1, Ordering::SeqCst);
            if self.fail_search {
                return Err(FetchError::network("search returned status 503"));
            }
            Ok(self.entries.get(component_id).cloned().unwrap_or_default())
        }

        async fn fetch_ligand(
            &self,
            entry_id: &str,
            component_id: &str,
        ) -> Result<String, FetchError> {
            self.ligands
                .get(entry_id)
                .cloned()
                .ok_or_else(|| FetchError::not_found(component_id))
        }
    }

    #[test]
    fn component_ids_are_trimmed_and_upper_cased() {
        assert_eq!(validate_component_id("atp").unwrap(), "ATP");
        assert_eq!(validate_component_id(" hem ").unwrap(), "HEM");
        assert_eq!(validate_component_id("A1B2C").unwrap(), "A1B2C");
    }

    #[test]
    fn malformed_component_ids_are_rejected() {
        for raw in ["", "   ", "TOOLONG", "AT P", "../x", "A-1"] {
            assert!(
                matches!(
                    validate_component_id(raw),
                    Err(FetchError::InvalidComponentId(_))
                ),
                "{raw:?} should be rejected"
            );
        }
    }

    #[tokio::test]
    async fn resolve_entry_takes_first_ranked_result() {
        let source = MockSource::atp();

        let entry = resolve_entry(&source, "ATP").await.expect("resolves");
        assert_eq!(entry, "3W2S");
    }

    #[tokio::test]
    async fn empty_search_is_not_found() {
        let source = MockSource::default();

        let err = resolve_entry(&source, "ZZZ").await.expect_err("no entries");
        match err {
            FetchError::NotFound { component_id } => assert_eq!(component_id, "ZZZ"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn atp_scenario_yields_single_atom_without_bonds() {
        let source = MockSource::atp();

        let pdb = fetch_structure(&source, "atp", &ConvertOptions::default())
            .await
            .expect("fetch succeeds");

        let lines: Vec<&str> = pdb.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("HETATM"));
        assert_eq!(lines[1], "END");

        let molecule = read_pdb_str(&pdb).expect("client parse succeeds");
        assert_eq!(molecule.atom_count(), 1);
        assert_eq!(molecule.bond_count(), 0);
        assert_eq!(molecule.atoms()[0].name, "PG");
    }

    #[tokio::test]
    async fn search_failure_is_a_network_error() {
        let source = MockSource {
            fail_search: true,
            ..MockSource::default()
        };

        let err = fetch_structure(&source, "ATP", &ConvertOptions::default())
            .await
            .expect_err("search fails");
        assert!(matches!(err, FetchError::Network(_)));
    }

    #[tokio::test]
    async fn unconvertible_markup_is_malformed_data() {
        let mut source = MockSource::atp();
        source
            .ligands
            .insert("3W2S".into(), "data_3W2S\n#\n".to_string());

        let err = fetch_structure(&source, "ATP", &ConvertOptions::default())
            .await
            .expect_err("no atom site");
        assert!(matches!(err, FetchError::MalformedData(_)));
    }

    #[tokio::test]
    async fn empty_ligand_body_is_not_found() {
        let mut source = MockSource::atp();
        source.ligands.insert("3W2S".into(), String::new());

        let err = fetch_structure(&source, "ATP", &ConvertOptions::default())
            .await
            .expect_err("empty body");
        assert!(matches!(err, FetchError::NotFound { .. }));
    }

    #[tokio::test]
    async fn invalid_id_never_reaches_the_source() {
        let source = MockSource::atp();

        let err = fetch_structure(&source, "A/B", &ConvertOptions::default())
            .await
            .expect_err("invalid id");
        assert!(matches!(err, FetchError::InvalidComponentId(_)));
        assert_eq!(source.search_count(), 0);
    }

    #[tokio::test]
    async fn cached_fetch_skips_remote_calls_on_hit() {
        let source = MockSource::atp();
        let cache = StructureCache::new(Duration::from_secs(60));
        let options = ConvertOptions::default();

        let first = fetch_structure_cached(&source, &cache, "ATP", &options)
            .await
            .expect("first fetch");
        let second = fetch_structure_cached(&source, &cache, "atp", &options)
            .await
            .expect("cached fetch");

        assert_eq!(first, second);
        assert_eq!(source.search_count(), 1);
    }

    #[tokio::test]
    async fn cached_fetch_keeps_conversion_variants_apart() {
        let mut source = MockSource::atp();
        source.ligands.insert(
            "3W2S".into(),
            "\
data_3W2S
loop_
_atom_site.group_PDB
_atom_site.id
_atom_site.type_symbol
_atom_site.label_atom_id
_atom_site.label_comp_id
_atom_site.auth_seq_id
_atom_site.Cartn_x
_atom_site.Cartn_y
_atom_site.Cartn_z
HETATM 1 P PG ATP 401 0.000 0.000 0.000
HETATM 2 O O1G ATP 401 1.500 0.000 0.000
#
loop_
_chem_comp_bond.comp_id
_chem_comp_bond.atom_id_1
_chem_comp_bond.atom_id_2
ATP PG O1G
#
"
            .to_string(),
        );
        let cache = StructureCache::new(Duration::from_secs(60));
        let with_conect = ConvertOptions::default();
        let without_conect = ConvertOptions {
            include_conect: false,
        };

        let first = fetch_structure_cached(&source, &cache, "ATP", &with_conect)
            .await
            .expect("fetch with CONECT");
        let second = fetch_structure_cached(&source, &cache, "ATP", &without_conect)
            .await
            .expect("fetch without CONECT");
        let third = fetch_structure_cached(&source, &cache, "atp", &without_conect)
            .await
            .expect("cached fetch without CONECT");

        assert!(first.contains("CONECT"));
        assert!(!second.contains("CONECT"));
        assert_eq!(second, third);
        assert_eq!(source.search_count(), 2);
        assert_eq!(cache.len(), 2);
    }

    #[tokio::test]
    async fn disabled_cache_always_hits_the_source() {
        let source = MockSource::atp();
        let cache = StructureCache::new(Duration::ZERO);
        let options = ConvertOptions::default();

        for _ in 0..2 {
            fetch_structure_cached(&source, &cache, "ATP", &options)
                .await
                .expect("fetch succeeds");
        }

        assert_eq!(source.search_count(), 2);
    }
}
