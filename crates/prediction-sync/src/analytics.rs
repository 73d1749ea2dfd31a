//! Page view counter polled by the admin panel.
//!
//! The public page records one view per load under the `page-views` key. A
//! count stored for an earlier day reads as zero.

use chrono::{Local, NaiveDate};

use crate::domain::PageViews;
use crate::store::{LocalStore, StoreError};

pub struct PageViewCounter {
    store: LocalStore,
}

impl PageViewCounter {
    pub fn new(store: LocalStore) -> Self {
        Self { store }
    }

    /// Views counted on `date`
    pub fn today(&self, date: NaiveDate) -> Result<PageViews, StoreError> {
        let key = day_key(date);
        Ok(match self.store.load_page_views()? {
            Some(views) if views.date == key => views,
            _ => PageViews::empty(key),
        })
    }

    pub fn today_local(&self) -> Result<PageViews, StoreError> {
        self.today(Local::now().date_naive())
    }
}

fn day_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Long form used on the analytics card, e.g. "Monday, January 1, 2024".
pub fn display_date(views: &PageViews) -> String {
    NaiveDate::parse_from_str(&views.date, "%Y-%m-%d")
        .map(|date| date.format("%A, %B %-d, %Y").to_string())
        .unwrap_or_else(|_| views.date.clone())
}
