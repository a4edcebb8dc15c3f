//! Product catalogue loading and lookup.

use std::collections::BTreeMap;
use std::io::Read;

use camino::Utf8Path;
use kindred_core::ItemId;

use crate::DataError;
use crate::fs::{READER_LABEL, open_utf8_file};

const ID_COLUMN: &str = "product_id";
const NAME_COLUMN: &str = "product_name";

/// Display attributes of one product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    id: ItemId,
    name: String,
    attributes: BTreeMap<String, String>,
}

impl Product {
    /// Product identifier, matching the ratings file's `product_id`.
    #[must_use]
    pub const fn id(&self) -> ItemId {
        self.id
    }

    /// Human-readable product name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Value of an extra column, keyed by its header.
    #[must_use]
    pub fn attribute(&self, column: &str) -> Option<&str> {
        self.attributes.get(column).map(String::as_str)
    }

    /// Iterate over extra columns in header-name order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.attributes
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }
}

/// Products keyed by id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalogue {
    products: BTreeMap<ItemId, Product>,
}

impl Catalogue {
    /// Look up a product for presentation.
    #[must_use]
    pub fn get(&self, item: ItemId) -> Option<&Product> {
        self.products.get(&item)
    }

    /// Report whether the catalogue lists `item`.
    #[must_use]
    pub fn contains(&self, item: ItemId) -> bool {
        self.products.contains_key(&item)
    }

    /// Iterate over products in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &Product> + '_ {
        self.products.values()
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Report whether the catalogue is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// Load a product CSV with header `product_id,product_name`.
///
/// Any further columns are kept as string attributes of each product.
///
/// # Errors
/// Returns [`DataError::Open`] when the file cannot be opened, and the
/// errors of [`read_catalogue`] otherwise.
pub fn load_catalogue(path: &Utf8Path) -> Result<Catalogue, DataError> {
    let file = open_utf8_file(path).map_err(|source| DataError::Open {
        path: path.to_owned(),
        source,
    })?;
    let catalogue = parse_catalogue(file, path)?;
    log::debug!("loaded {} products from {path}", catalogue.len());
    Ok(catalogue)
}

/// Read a product CSV from any reader.
///
/// # Errors
/// Returns [`DataError::Parse`] for unreadable CSV,
/// [`DataError::MissingColumn`] when `product_id` or `product_name` is absent,
/// [`DataError::InvalidProductId`] for a non-numeric id, and
/// [`DataError::DuplicateProduct`] when an id repeats.
///
/// # Examples
/// ```
/// use kindred_core::ItemId;
/// use kindred_data::read_catalogue;
///
/// let csv = "product_id,product_name,category\n10,Kettle,kitchen\n";
/// let catalogue = read_catalogue(csv.as_bytes()).expect("valid catalogue");
/// let kettle = catalogue.get(ItemId::new(10)).expect("listed product");
/// assert_eq!(kettle.name(), "Kettle");
/// assert_eq!(kettle.attribute("category"), Some("kitchen"));
/// ```
pub fn read_catalogue<R: Read>(reader: R) -> Result<Catalogue, DataError> {
    parse_catalogue(reader, Utf8Path::new(READER_LABEL))
}

fn parse_catalogue<R: Read>(reader: R, origin: &Utf8Path) -> Result<Catalogue, DataError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = csv_reader
        .headers()
        .map_err(|err| DataError::parse(origin, err))?
        .clone();
    let id_index = column_index(&headers, ID_COLUMN, origin)?;
    let name_index = column_index(&headers, NAME_COLUMN, origin)?;

    let mut products = BTreeMap::new();
    for record in csv_reader.records() {
        let fields = record.map_err(|err| DataError::parse(origin, err))?;
        let line = fields.position().map_or(0, csv::Position::line);
        let raw_id = fields.get(id_index).unwrap_or_default();
        let id = raw_id
            .parse::<u64>()
            .map(ItemId::new)
            .map_err(|_| DataError::InvalidProductId {
                path: origin.to_owned(),
                line,
                value: raw_id.to_owned(),
            })?;
        let attributes = headers
            .iter()
            .zip(fields.iter())
            .enumerate()
            .filter(|(index, _)| *index != id_index && *index != name_index)
            .map(|(_, (key, value))| (key.to_owned(), value.to_owned()))
            .collect();
        let product = Product {
            id,
            name: fields.get(name_index).unwrap_or_default().to_owned(),
            attributes,
        };
        if products.insert(id, product).is_some() {
            return Err(DataError::DuplicateProduct { item: id });
        }
    }
    Ok(Catalogue { products })
}

fn column_index(
    headers: &csv::StringRecord,
    column: &'static str,
    origin: &Utf8Path,
) -> Result<usize, DataError> {
    headers
        .iter()
        .position(|header| header == column)
        .ok_or_else(|| DataError::MissingColumn {
            path: origin.to_owned(),
            column,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn extra_columns_become_attributes() {
        let csv = "category,product_id,product_name,colour\nkitchen,10,Kettle,red\n";
        let catalogue = read_catalogue(csv.as_bytes()).expect("valid catalogue");
        let product = catalogue.get(ItemId::new(10)).expect("listed product");
        assert_eq!(product.id(), ItemId::new(10));
        assert_eq!(product.name(), "Kettle");
        assert_eq!(
            product.attributes().collect::<Vec<_>>(),
            vec![("category", "kitchen"), ("colour", "red")]
        );
    }

    #[rstest]
    fn numeric_looking_names_stay_strings() {
        let csv = "product_id,product_name\n3,1984\n";
        let catalogue = read_catalogue(csv.as_bytes()).expect("valid catalogue");
        let product = catalogue.get(ItemId::new(3)).expect("listed product");
        assert_eq!(product.name(), "1984");
    }

    #[rstest]
    fn unknown_products_are_absent() {
        let csv = "product_id,product_name\n1,Tea\n";
        let catalogue = read_catalogue(csv.as_bytes()).expect("valid catalogue");
        assert!(catalogue.get(ItemId::new(2)).is_none());
        assert!(!catalogue.contains(ItemId::new(2)));
        assert_eq!(catalogue.len(), 1);
    }

    #[rstest]
    fn duplicate_ids_are_rejected() {
        let csv = "product_id,product_name\n1,Tea\n2,Coffee\n1,Cocoa\n";
        let err = read_catalogue(csv.as_bytes()).expect_err("duplicate id");
        assert!(matches!(
            err,
            DataError::DuplicateProduct { item } if item == ItemId::new(1)
        ));
    }

    #[rstest]
    #[case("product_name\nTea\n", ID_COLUMN)]
    #[case("product_id\n1\n", NAME_COLUMN)]
    fn missing_columns_are_reported(#[case] csv: &str, #[case] expected: &str) {
        let err = read_catalogue(csv.as_bytes()).expect_err("missing column");
        assert!(matches!(err, DataError::MissingColumn { column, .. } if column == expected));
    }

    #[rstest]
    fn non_numeric_ids_report_their_line() {
        let csv = "product_id,product_name\n1,Tea\nabc,Coffee\n";
        let err = read_catalogue(csv.as_bytes()).expect_err("bad id");
        assert!(matches!(
            err,
            DataError::InvalidProductId { line: 3, ref value, .. } if value == "abc"
        ));
    }

    #[rstest]
    fn ragged_rows_are_parse_errors() {
        let csv = "product_id,product_name\n1,Tea,extra\n";
        let err = read_catalogue(csv.as_bytes()).expect_err("ragged row");
        assert!(matches!(err, DataError::Parse { line: 2, .. }));
    }
}
