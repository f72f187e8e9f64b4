//! Product catalog queries: filter, sort, paginate.
//!
//! The catalog is an in-memory snapshot fetched once from the `products`
//! collection. Queries are pure and side-effect-free; malformed numeric
//! bounds are coerced, never rejected, so a query cannot fail.

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crescent_core::{DocumentStore, Product, ProductId, collections, decode};

use crate::error::Result;

/// Products shown per listing page.
pub const DEFAULT_PAGE_SIZE: usize = 9;

/// Sort order for the shop listing, keyed by the UI's `orderby` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Descending review count.
    Popularity,
    /// Descending star rating.
    Rating,
    /// Descending lexicographic id.
    Latest,
    /// Ascending price.
    PriceAsc,
    /// Descending price.
    PriceDesc,
    /// Ascending lexicographic title.
    #[default]
    #[serde(rename = "default")]
    TitleAsc,
}

impl SortKey {
    /// The UI's `orderby` value for this key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Popularity => "popularity",
            Self::Rating => "rating",
            Self::Latest => "latest",
            Self::PriceAsc => "price-asc",
            Self::PriceDesc => "price-desc",
            Self::TitleAsc => "default",
        }
    }
}

impl std::str::FromStr for SortKey {
    type Err = std::convert::Infallible;

    /// Unrecognized values fall back to the default title sort, matching
    /// the listing page's `<select>` handling.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "popularity" => Self::Popularity,
            "rating" => Self::Rating,
            "latest" => Self::Latest,
            "price-asc" => Self::PriceAsc,
            "price-desc" => Self::PriceDesc,
            _ => Self::TitleAsc,
        })
    }
}

/// A filter/sort/paginate request against the catalog.
///
/// All filter predicates are AND'd together; an empty facet set means "no
/// restriction" for that facet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogQuery {
    /// Case-insensitive substring matched against title, tag, category or
    /// id; empty matches everything.
    pub search: String,
    pub categories: BTreeSet<String>,
    /// Union of "at least N stars" thresholds.
    pub ratings_min: BTreeSet<u8>,
    pub colors: BTreeSet<String>,
    /// Lower price bound; `None` means 0.
    pub price_min: Option<Decimal>,
    /// Upper price bound; `None` means unbounded.
    pub price_max: Option<Decimal>,
    pub sort: SortKey,
    /// 1-based page number; out-of-range values clamp.
    pub page: usize,
    pub page_size: usize,
}

impl Default for CatalogQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            categories: BTreeSet::new(),
            ratings_min: BTreeSet::new(),
            colors: BTreeSet::new(),
            price_min: None,
            price_max: None,
            sort: SortKey::default(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl CatalogQuery {
    /// Set price bounds from raw form input, coercing anything unparsable
    /// to the open bound (min 0, max unbounded).
    pub fn set_price_bounds_raw(&mut self, min: &str, max: &str) {
        self.price_min = min.trim().parse().ok();
        self.price_max = max.trim().parse().ok();
    }

    fn matches(&self, product: &Product) -> bool {
        let term = self.search.trim().to_lowercase();
        let matches_search = term.is_empty()
            || product.title.to_lowercase().contains(&term)
            || product.tag.to_lowercase().contains(&term)
            || product.category.to_lowercase().contains(&term)
            || product.id.as_str().to_lowercase().contains(&term);

        let matches_category =
            self.categories.is_empty() || self.categories.contains(&product.category);

        let matches_rating =
            self.ratings_min.is_empty() || self.ratings_min.iter().any(|r| product.rating >= *r);

        let matches_color = self.colors.is_empty() || self.colors.contains(&product.color);

        let min = self.price_min.unwrap_or(Decimal::ZERO);
        let matches_price =
            product.price >= min && self.price_max.is_none_or(|max| product.price <= max);

        matches_search && matches_category && matches_rating && matches_color && matches_price
    }
}

/// One page of catalog results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogPage {
    pub items: Vec<Product>,
    /// The page actually served, after clamping.
    pub page: usize,
    pub total_pages: usize,
    pub total_matches: usize,
    /// 1-based inclusive result range ("Showing X-Y of Z"); `(0, 0)` when
    /// there are no matches.
    pub showing: (usize, usize),
}

/// The product set, answering filtered/sorted/paginated queries.
#[derive(Debug, Clone, Default)]
pub struct ProductCatalog {
    products: Vec<Product>,
}

impl ProductCatalog {
    /// Build a catalog from an already-fetched product list.
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Fetch the `products` collection and keep the storefront's
    /// department (the shop listing shows a single department tag).
    ///
    /// # Errors
    ///
    /// Returns a store error if the collection cannot be read or a product
    /// document cannot be decoded.
    #[instrument(skip(store))]
    pub async fn load<S: DocumentStore>(store: &S, department_tag: &str) -> Result<Self> {
        let documents = store.list(collections::PRODUCTS).await?;
        let mut products = Vec::with_capacity(documents.len());
        for (_, doc) in documents {
            let product: Product = decode(doc)?;
            if product.tag == department_tag {
                products.push(product);
            }
        }
        tracing::debug!(count = products.len(), department_tag, "catalog loaded");
        Ok(Self::new(products))
    }

    /// All products in the snapshot.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by id.
    #[must_use]
    pub fn find(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Answer a query: filter, sort, then serve the requested page.
    ///
    /// Requesting a page past the end clamps to the last page; a query
    /// with zero matches yields one empty page.
    #[must_use]
    pub fn page(&self, query: &CatalogQuery) -> CatalogPage {
        let mut matched: Vec<&Product> =
            self.products.iter().filter(|p| query.matches(p)).collect();

        // Vec::sort_by is stable, so ties keep their original relative order.
        match query.sort {
            SortKey::Popularity => matched.sort_by(|a, b| b.reviews.cmp(&a.reviews)),
            SortKey::Rating => matched.sort_by(|a, b| b.rating.cmp(&a.rating)),
            SortKey::Latest => matched.sort_by(|a, b| b.id.as_str().cmp(a.id.as_str())),
            SortKey::PriceAsc => matched.sort_by(|a, b| a.price.cmp(&b.price)),
            SortKey::PriceDesc => matched.sort_by(|a, b| b.price.cmp(&a.price)),
            SortKey::TitleAsc => matched.sort_by(|a, b| a.title.cmp(&b.title)),
        }

        let page_size = query.page_size.max(1);
        let total_matches = matched.len();
        let total_pages = total_matches.div_ceil(page_size).max(1);
        let page = query.page.clamp(1, total_pages);

        let start = (page - 1) * page_size;
        let items: Vec<Product> = matched
            .into_iter()
            .skip(start)
            .take(page_size)
            .cloned()
            .collect();

        let showing = if items.is_empty() {
            (0, 0)
        } else {
            (start + 1, start + items.len())
        };

        CatalogPage {
            items,
            page,
            total_pages,
            total_matches,
            showing,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn product(id: &str, title: &str, category: &str, color: &str, rating: u8, reviews: u32, price: i64) -> Product {
        Product {
            id: ProductId::new(id),
            title: title.to_owned(),
            tag: "Electronics".to_owned(),
            category: category.to_owned(),
            color: color.to_owned(),
            rating,
            reviews,
            price: Decimal::from(price),
            compare_at: None,
            image: String::new(),
            sale_percent: 0,
            is_new: false,
            sku: None,
        }
    }

    fn sample_catalog() -> ProductCatalog {
        ProductCatalog::new(vec![
            product("1", "Wireless Headphones", "Audio", "Black", 4, 120, 150),
            product("2", "Smart Watch", "Wearables", "Silver", 5, 300, 300),
            product("3", "Phone Case", "Accessories", "Blue", 3, 8, 25),
            product("4", "Bluetooth Speaker", "Audio", "Black", 4, 45, 80),
            product("5", "USB-C Hub", "Accessories", "Grey", 2, 12, 40),
        ])
    }

    #[test]
    fn test_empty_query_matches_everything() {
        let catalog = sample_catalog();
        let page = catalog.page(&CatalogQuery::default());
        assert_eq!(page.total_matches, 5);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.showing, (1, 5));
    }

    #[test]
    fn test_search_matches_title_category_and_id() {
        let catalog = sample_catalog();

        let mut query = CatalogQuery {
            search: "AUDIO".to_owned(), // case-insensitive, hits category
            ..CatalogQuery::default()
        };
        assert_eq!(catalog.page(&query).total_matches, 2);

        query.search = "watch".to_owned(); // hits title
        assert_eq!(catalog.page(&query).total_matches, 1);

        query.search = "5".to_owned(); // hits id
        assert_eq!(catalog.page(&query).total_matches, 1);
    }

    #[test]
    fn test_rating_filter_is_union_of_thresholds() {
        let catalog = sample_catalog();
        let query = CatalogQuery {
            // "at least 3" OR "at least 5": the lower threshold dominates
            ratings_min: [3, 5].into_iter().collect(),
            ..CatalogQuery::default()
        };
        assert_eq!(catalog.page(&query).total_matches, 4);
    }

    #[test]
    fn test_price_bounds_coerce_malformed_input() {
        let catalog = sample_catalog();
        let mut query = CatalogQuery::default();
        query.set_price_bounds_raw("not-a-number", "100");
        let page = catalog.page(&query);
        // min coerced to 0; products priced 25, 40, 80
        assert_eq!(page.total_matches, 3);

        query.set_price_bounds_raw("50", "");
        // max coerced to unbounded; products priced 80, 150, 300
        assert_eq!(catalog.page(&query).total_matches, 3);
    }

    #[test]
    fn test_all_predicates_and_together() {
        let catalog = sample_catalog();
        let query = CatalogQuery {
            categories: ["Audio".to_owned()].into(),
            colors: ["Black".to_owned()].into(),
            ratings_min: [4].into_iter().collect(),
            price_min: Some(Decimal::from(100)),
            ..CatalogQuery::default()
        };
        let page = catalog.page(&query);
        assert_eq!(page.total_matches, 1);
        assert_eq!(page.items.first().unwrap().id.as_str(), "1");
    }

    #[test]
    fn test_sort_orders() {
        let catalog = sample_catalog();
        let ids = |sort: SortKey| -> Vec<String> {
            let query = CatalogQuery {
                sort,
                ..CatalogQuery::default()
            };
            catalog
                .page(&query)
                .items
                .iter()
                .map(|p| p.id.as_str().to_owned())
                .collect()
        };

        assert_eq!(ids(SortKey::Popularity), vec!["2", "1", "4", "5", "3"]);
        assert_eq!(ids(SortKey::PriceAsc), vec!["3", "5", "4", "1", "2"]);
        assert_eq!(ids(SortKey::PriceDesc), vec!["2", "1", "4", "5", "3"]);
        assert_eq!(ids(SortKey::Latest), vec!["5", "4", "3", "2", "1"]);
        // default: ascending title
        assert_eq!(ids(SortKey::TitleAsc), vec!["4", "3", "2", "5", "1"]);
    }

    #[test]
    fn test_stable_sort_keeps_tied_order() {
        let catalog = sample_catalog();
        let query = CatalogQuery {
            sort: SortKey::Rating,
            ..CatalogQuery::default()
        };
        let page = catalog.page(&query);
        let ids: Vec<&str> = page.items.iter().map(|p| p.id.as_str()).collect();
        // products 1 and 4 both rate 4; original relative order (1 before 4) holds
        assert_eq!(ids, vec!["2", "1", "4", "3", "5"]);
    }

    #[test]
    fn test_filter_idempotence() {
        let catalog = sample_catalog();
        let query = CatalogQuery {
            search: "a".to_owned(),
            sort: SortKey::Popularity,
            ..CatalogQuery::default()
        };
        assert_eq!(catalog.page(&query), catalog.page(&query));
    }

    #[test]
    fn test_pagination_clamps_past_last_page() {
        // 19 products, page size 9, filter narrows to 10 matches
        let mut products: Vec<Product> = (1..=10)
            .map(|i| product(&format!("m{i:02}"), &format!("Match {i:02}"), "Audio", "Black", 4, 0, 10))
            .collect();
        products.extend(
            (1..=9).map(|i| product(&format!("x{i}"), &format!("Other {i}"), "Misc", "Red", 1, 0, 10)),
        );
        let catalog = ProductCatalog::new(products);

        let query = CatalogQuery {
            categories: ["Audio".to_owned()].into(),
            page: 3,
            ..CatalogQuery::default()
        };
        let page = catalog.page(&query);
        assert_eq!(page.total_matches, 10);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.page, 2); // clamped to the last page
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.showing, (10, 10));
    }

    #[test]
    fn test_zero_results_yields_one_empty_page() {
        let catalog = sample_catalog();
        let query = CatalogQuery {
            search: "no-such-product".to_owned(),
            ..CatalogQuery::default()
        };
        let page = catalog.page(&query);
        assert_eq!(page.total_matches, 0);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.page, 1);
        assert!(page.items.is_empty());
        assert_eq!(page.showing, (0, 0));
    }

    #[test]
    fn test_sort_key_ui_roundtrip() {
        for key in [
            SortKey::Popularity,
            SortKey::Rating,
            SortKey::Latest,
            SortKey::PriceAsc,
            SortKey::PriceDesc,
            SortKey::TitleAsc,
        ] {
            let parsed: SortKey = key.as_str().parse().unwrap();
            assert_eq!(parsed, key);
        }
        let fallback: SortKey = "garbage".parse().unwrap();
        assert_eq!(fallback, SortKey::TitleAsc);
    }
}
