//! Output formatting for items, pages, totals and stages (table, JSON, markdown, CSV).

use crate::cart::Totals;
use crate::catalog::status::{progress, stage_index, Stage};
use crate::catalog::Item;
use crate::config::OutputFormat;
use crate::query::{Page, Pagination};
use serde::Serialize;

/// Formats engine results for output.
pub struct Formatter {
    format: OutputFormat,
    currency: String,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format, currency: "EUR".to_string() }
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    /// Formats a single item with its specifications.
    pub fn format_item(&self, item: &Item) -> String {
        match self.format {
            OutputFormat::Json => Self::json(item, "{}"),
            OutputFormat::Table => self.table_single(item),
            OutputFormat::Markdown => self.markdown_single(item),
            OutputFormat::Csv => self.csv_items(std::slice::from_ref(item)),
        }
    }

    /// Formats a list of items.
    pub fn format_items(&self, items: &[Item]) -> String {
        if items.is_empty() {
            return match self.format {
                OutputFormat::Json => "[]".to_string(),
                OutputFormat::Csv => Self::csv_header(),
                _ => "No items found.".to_string(),
            };
        }

        match self.format {
            OutputFormat::Json => Self::json(items, "[]"),
            OutputFormat::Table => self.table_items(items),
            OutputFormat::Markdown => self.markdown_items(items),
            OutputFormat::Csv => self.csv_items(items),
        }
    }

    /// Formats one page of results with a position footer.
    pub fn format_page(&self, page: &Page<Item>) -> String {
        match self.format {
            OutputFormat::Json => Self::json(page, "{}"),
            OutputFormat::Csv => self.format_items(&page.items),
            OutputFormat::Table | OutputFormat::Markdown => {
                let mut out = self.format_items(&page.items);
                if !page.items.is_empty() {
                    out.push('\n');
                    out.push_str(&Self::page_footer(&page.pagination));
                }
                out
            }
        }
    }

    /// Formats a cart price breakdown.
    pub fn format_totals(&self, totals: &Totals) -> String {
        match self.format {
            OutputFormat::Json => Self::json(totals, "{}"),
            OutputFormat::Csv => format!(
                "subtotal,originalSubtotal,savings,promoDiscount,shippingCost,total,itemCount\n{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{}",
                totals.subtotal,
                totals.original_subtotal,
                totals.savings,
                totals.promo_discount,
                totals.shipping_cost,
                totals.total,
                totals.item_count
            ),
            OutputFormat::Table => self.table_totals(totals),
            OutputFormat::Markdown => self.markdown_totals(totals),
        }
    }

    /// Formats a status with its position in the workflow.
    pub fn format_stage<S: Stage + Serialize>(&self, status: S) -> String {
        let steps: Vec<String> = S::sequence()
            .iter()
            .enumerate()
            .map(|(i, stage)| {
                let done = stage_index(status).is_some_and(|current| i <= current);
                match self.format {
                    OutputFormat::Markdown => {
                        format!("- [{}] {}", if done { "x" } else { " " }, stage)
                    }
                    _ => format!("  {} {}", if done { "[x]" } else { "[ ]" }, stage),
                }
            })
            .collect();

        let pct = (progress(status) * 100.0).round() as u32;

        match self.format {
            OutputFormat::Json => {
                #[derive(Serialize)]
                struct StageView<T> {
                    status: T,
                    index: Option<usize>,
                    progress: f64,
                }
                Self::json(
                    &StageView { status, index: stage_index(status), progress: progress(status) },
                    "{}",
                )
            }
            OutputFormat::Csv => format!(
                "status,index,progress\n{},{},{:.2}",
                status,
                stage_index(status).map(|i| i.to_string()).unwrap_or_default(),
                progress(status)
            ),
            OutputFormat::Markdown => {
                format!("**Status:** {} ({}%)\n\n{}", status, pct, steps.join("\n"))
            }
            OutputFormat::Table => {
                let bar_len = 20;
                let filled = (progress(status) * bar_len as f64).round() as usize;
                format!(
                    "Status:   {}\nProgress: [{}{}] {}%\n\n{}",
                    status,
                    "#".repeat(filled),
                    "-".repeat(bar_len - filled),
                    pct,
                    steps.join("\n")
                )
            }
        }
    }

    fn json<T: Serialize + ?Sized>(value: &T, fallback: &str) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| fallback.to_string())
    }

    fn money(&self, amount: f64) -> String {
        format!("{} {:.2}", self.currency, amount)
    }

    fn truncate(s: &str, max: usize) -> String {
        if s.chars().count() > max {
            let head: String = s.chars().take(max - 3).collect();
            format!("{}...", head)
        } else {
            s.to_string()
        }
    }

    fn page_footer(p: &Pagination) -> String {
        format!("Showing {}-{} of {} (page {}/{})", p.start_item(), p.end_item(), p.total, p.page, p.total_pages)
    }

    // Table formatting

    fn table_single(&self, item: &Item) -> String {
        let mut lines = Vec::new();

        lines.push(format!("ID:       {}", item.id));
        lines.push(format!("Title:    {}", item.title));

        let price_str = match item.original_price.filter(|_| item.is_discounted()) {
            Some(orig) => format!(
                "{} (was {:.2}, -{}%)",
                self.money(item.price),
                orig,
                item.discount_percent().unwrap_or(0)
            ),
            None => self.money(item.price),
        };
        lines.push(format!("Price:    {}", price_str));

        let category = match &item.subcategory {
            Some(sub) => format!("{} / {}", item.category, sub),
            None => item.category.clone(),
        };
        lines.push(format!("Category: {}", category));

        if let Some(brand) = &item.brand {
            lines.push(format!("Brand:    {}", brand));
        }

        lines.push(format!("Rating:   {:.1}/5 ({} reviews)", item.rating, item.review_count));

        let stock = match (item.in_stock, item.stock_count) {
            (true, Some(n)) => format!("In Stock ({})", n),
            (true, None) => "In Stock".to_string(),
            (false, _) => "Out of Stock".to_string(),
        };
        lines.push(format!("Stock:    {}", stock));

        if item.featured {
            lines.push("Badges:   Featured".to_string());
        }

        if !item.specifications.is_empty() {
            lines.push(String::new());
            let width = item.specifications.keys().map(|k| k.len()).max().unwrap_or(0);
            for (name, value) in &item.specifications {
                lines.push(format!("  {:<width$}  {}", name, value));
            }
        }

        lines.join("\n")
    }

    fn table_items(&self, items: &[Item]) -> String {
        let id_width = 12;
        let price_width = 10;
        let rating_width = 6;
        let stock_width = 5;
        let title_width = 50;

        let mut lines = Vec::new();

        lines.push(format!(
            "{:<id_width$}  {:<price_width$}  {:<rating_width$}  {:<stock_width$}  {}",
            "ID", "Price", "Rating", "Stock", "Title"
        ));
        lines.push(format!(
            "{:-<id_width$}  {:-<price_width$}  {:-<rating_width$}  {:-<stock_width$}  {:-<title_width$}",
            "", "", "", "", ""
        ));

        for item in items {
            let stock_str = if item.in_stock { "Yes" } else { "No" };
            let title = if item.featured {
                Self::truncate(&format!("* {}", item.title), title_width)
            } else {
                Self::truncate(&item.title, title_width)
            };

            lines.push(format!(
                "{:<id_width$}  {:>price_width$.2}  {:>rating_width$.1}  {:<stock_width$}  {}",
                Self::truncate(&item.id, id_width),
                item.price,
                item.rating,
                stock_str,
                title
            ));
        }

        lines.push(String::new());
        lines.push(format!("Total: {} items", items.len()));

        lines.join("\n")
    }

    fn table_totals(&self, totals: &Totals) -> String {
        let mut lines = Vec::new();

        lines.push(format!("Items:     {}", totals.item_count));
        lines.push(format!("Subtotal:  {}", self.money(totals.subtotal)));
        if totals.savings > 0.0 {
            lines.push(format!("Savings:   {}", self.money(totals.savings)));
        }
        if let Some(code) = &totals.promo_code {
            lines.push(format!("Promo:     -{} ({})", self.money(totals.promo_discount), code));
        }
        let shipping = match (&totals.shipping_option, totals.shipping_cost) {
            (Some(option), cost) if cost == 0.0 => format!("Free ({})", option),
            (Some(option), cost) => format!("{} ({})", self.money(cost), option),
            (None, _) => "Not required".to_string(),
        };
        lines.push(format!("Shipping:  {}", shipping));
        lines.push(format!("{:-<30}", ""));
        lines.push(format!("Total:     {}", self.money(totals.total)));

        lines.join("\n")
    }

    // Markdown formatting

    fn markdown_single(&self, item: &Item) -> String {
        let mut lines = Vec::new();

        lines.push(format!("## {}", item.title));
        lines.push(String::new());

        lines.push(format!("- **ID:** {}", item.id));
        match item.original_price.filter(|_| item.is_discounted()) {
            Some(orig) => {
                lines.push(format!("- **Price:** {} ~~{:.2}~~", self.money(item.price), orig))
            }
            None => lines.push(format!("- **Price:** {}", self.money(item.price))),
        }
        lines.push(format!("- **Category:** {}", item.category));
        if let Some(brand) = &item.brand {
            lines.push(format!("- **Brand:** {}", brand));
        }
        lines.push(format!("- **Rating:** {:.1}/5 ({} reviews)", item.rating, item.review_count));
        lines.push(format!(
            "- **Stock:** {}",
            if item.in_stock { "In Stock" } else { "Out of Stock" }
        ));

        if !item.specifications.is_empty() {
            lines.push(String::new());
            lines.push("| Specification | Value |".to_string());
            lines.push("|---------------|-------|".to_string());
            for (name, value) in &item.specifications {
                lines.push(format!("| {} | {} |", name, value));
            }
        }

        lines.join("\n")
    }

    fn markdown_items(&self, items: &[Item]) -> String {
        let mut lines = Vec::new();

        lines.push("| ID | Price | Rating | In stock | Title |".to_string());
        lines.push("|----|-------|--------|----------|-------|".to_string());

        for item in items {
            let stock_str = if item.in_stock { "✓" } else { "" };
            lines.push(format!(
                "| {} | {:.2} | {:.1} | {} | {} |",
                item.id,
                item.price,
                item.rating,
                stock_str,
                Self::truncate(&item.title, 40)
            ));
        }

        lines.push(String::new());
        lines.push(format!("*{} items found*", items.len()));

        lines.join("\n")
    }

    fn markdown_totals(&self, totals: &Totals) -> String {
        let mut lines = vec!["| | Amount |".to_string(), "|---|---:|".to_string()];

        lines.push(format!("| Subtotal | {} |", self.money(totals.subtotal)));
        if totals.savings > 0.0 {
            lines.push(format!("| Savings | {} |", self.money(totals.savings)));
        }
        if let Some(code) = &totals.promo_code {
            lines.push(format!("| Promo `{}` | -{} |", code, self.money(totals.promo_discount)));
        }
        lines.push(format!("| Shipping | {} |", self.money(totals.shipping_cost)));
        lines.push(format!("| **Total** | **{}** |", self.money(totals.total)));

        lines.join("\n")
    }

    // CSV formatting

    fn csv_header() -> String {
        "id,title,price,original_price,category,subcategory,brand,rating,reviews,in_stock,stock_count,featured"
            .to_string()
    }

    fn csv_items(&self, items: &[Item]) -> String {
        let mut lines = Vec::new();
        lines.push(Self::csv_header());

        for item in items {
            let original = item.original_price.map(|o| o.to_string()).unwrap_or_default();
            let subcategory =
                item.subcategory.as_deref().map(Self::csv_escape).unwrap_or_default();
            let brand = item.brand.as_deref().map(Self::csv_escape).unwrap_or_default();
            let stock = item.stock_count.map(|n| n.to_string()).unwrap_or_default();

            lines.push(format!(
                "{},{},{},{},{},{},{},{},{},{},{},{}",
                Self::csv_escape(&item.id),
                Self::csv_escape(&item.title),
                item.price,
                original,
                Self::csv_escape(&item.category),
                subcategory,
                brand,
                item.rating,
                item.review_count,
                item.in_stock,
                stock,
                item.featured
            ));
        }

        lines.join("\n")
    }

    fn csv_escape(s: &str) -> String {
        if s.contains(',') || s.contains('"') || s.contains('\n') {
            format!("\"{}\"", s.replace('"', "\"\""))
        } else {
            s.to_string()
        }
    }
}
