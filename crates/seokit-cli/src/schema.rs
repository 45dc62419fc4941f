//! `seokit schema`: build schema.org markup from command line options

use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset};
use clap::{Args, Subcommand, ValueEnum};

use seokit_core::JsonLd;
use seokit_core::schema::{
    Article, ArticleKind, Availability, BreadcrumbList, ContactPoint, FaqPage, ImageObject, Offer,
    Organization, Person, PostalAddress, Product, Publisher,
};

#[derive(Debug, Args)]
pub struct SchemaArgs {
    /// Wrap the markup in a `<script type="application/ld+json">` tag
    #[arg(long, global = true)]
    pub script: bool,

    #[command(subcommand)]
    pub kind: SchemaKind,
}

#[derive(Debug, Subcommand)]
pub enum SchemaKind {
    /// Article, BlogPosting, NewsArticle and friends
    Article(ArticleArgs),
    Product(ProductArgs),
    Organization(OrganizationArgs),
    /// FAQPage from question/answer pairs
    Faq(FaqArgs),
    Breadcrumb(BreadcrumbArgs),
}

#[derive(Debug, Args)]
pub struct ArticleArgs {
    #[arg(long)]
    pub headline: String,

    /// Article, BlogPosting, NewsArticle, TechArticle, ScholarlyArticle or Report
    #[arg(long = "type", default_value = "Article")]
    pub kind: ArticleKind,

    #[arg(long)]
    pub author: Option<String>,

    #[arg(long)]
    pub author_url: Option<String>,

    #[arg(long)]
    pub publisher: Option<String>,

    /// Publisher logo URL
    #[arg(long, requires = "publisher")]
    pub logo: Option<String>,

    /// RFC 3339 timestamp, e.g. 2024-03-20T09:00:00+03:30
    #[arg(long)]
    pub published: Option<DateTime<FixedOffset>>,

    #[arg(long)]
    pub modified: Option<DateTime<FixedOffset>>,

    #[arg(long)]
    pub description: Option<String>,

    /// Image URL; repeat for several images
    #[arg(long)]
    pub image: Vec<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StockArg {
    InStock,
    OutOfStock,
    PreOrder,
    Discontinued,
}

impl From<StockArg> for Availability {
    fn from(value: StockArg) -> Self {
        match value {
            StockArg::InStock => Availability::InStock,
            StockArg::OutOfStock => Availability::OutOfStock,
            StockArg::PreOrder => Availability::PreOrder,
            StockArg::Discontinued => Availability::Discontinued,
        }
    }
}

#[derive(Debug, Args)]
pub struct ProductArgs {
    #[arg(long)]
    pub name: String,

    /// Price as a decimal string
    #[arg(long)]
    pub price: Option<String>,

    #[arg(long, default_value = "IRR")]
    pub currency: String,

    #[arg(long, value_enum, default_value = "in-stock")]
    pub availability: StockArg,

    #[arg(long)]
    pub brand: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub image: Option<String>,

    /// Product page URL, used for the offer
    #[arg(long)]
    pub url: Option<String>,

    /// Average rating, 1 to 5
    #[arg(long, requires = "reviews")]
    pub rating: Option<f64>,

    #[arg(long)]
    pub reviews: Option<u32>,
}

#[derive(Debug, Args)]
pub struct OrganizationArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub url: Option<String>,

    #[arg(long)]
    pub logo: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    /// Customer service telephone
    #[arg(long)]
    pub phone: Option<String>,

    /// Social profile URL; repeat for several profiles
    #[arg(long)]
    pub same_as: Vec<String>,

    #[arg(long)]
    pub city: Option<String>,

    #[arg(long)]
    pub country: Option<String>,
}

#[derive(Debug, Args)]
pub struct FaqArgs {
    /// `question::answer`; repeat for every entry
    #[arg(long = "qa", value_parser = parse_question)]
    pub entries: Vec<(String, String)>,
}

#[derive(Debug, Args)]
pub struct BreadcrumbArgs {
    /// `name=url`, or just `name` for the current page; repeat in order
    #[arg(long = "item", value_parser = parse_crumb)]
    pub items: Vec<(String, Option<String>)>,
}

fn parse_question(raw: &str) -> Result<(String, String), String> {
    let (question, answer) = raw
        .split_once("::")
        .ok_or_else(|| format!("expected 'question::answer', got '{raw}'"))?;
    Ok((question.trim().to_string(), answer.trim().to_string()))
}

fn parse_crumb(raw: &str) -> Result<(String, Option<String>), String> {
    match raw.split_once('=') {
        Some((name, url)) if !url.trim().is_empty() => {
            Ok((name.trim().to_string(), Some(url.trim().to_string())))
        }
        Some((name, _)) => Ok((name.trim().to_string(), None)),
        None => Ok((raw.trim().to_string(), None)),
    }
}

pub fn build_article(args: &ArticleArgs) -> Article {
    let mut article = Article::new(args.kind, &args.headline);
    if let Some(author) = &args.author {
        let mut person = Person::new(author);
        if let Some(url) = &args.author_url {
            person = person.url(url);
        }
        article = article.author(person);
    }
    if let Some(name) = &args.publisher {
        let mut publisher = Publisher::new(name);
        if let Some(logo) = &args.logo {
            publisher = publisher.logo(logo);
        }
        article = article.publisher(publisher);
    }
    if let Some(at) = args.published {
        article = article.published(at);
    }
    if let Some(at) = args.modified {
        article = article.modified(at);
    }
    if let Some(description) = &args.description {
        article = article.description(description);
    }
    for url in &args.image {
        article = article.image(ImageObject::new(url));
    }
    article
}

pub fn build_product(args: &ProductArgs) -> Product {
    let mut product = Product::new(&args.name);
    if let Some(price) = &args.price {
        let mut offer = Offer::new(price, &args.currency).availability(args.availability.into());
        if let Some(url) = &args.url {
            offer = offer.url(url);
        }
        product = product.offer(offer);
    }
    if let Some(brand) = &args.brand {
        product = product.brand(brand);
    }
    if let Some(description) = &args.description {
        product = product.description(description);
    }
    if let Some(image) = &args.image {
        product = product.image(image);
    }
    if let (Some(rating), Some(reviews)) = (args.rating, args.reviews) {
        product = product.rating(rating, reviews);
    }
    product
}

pub fn build_organization(args: &OrganizationArgs) -> Organization {
    let mut org = Organization::new(&args.name);
    if let Some(url) = &args.url {
        org = org.url(url);
    }
    if let Some(logo) = &args.logo {
        org = org.logo(logo);
    }
    if let Some(description) = &args.description {
        org = org.description(description);
    }
    if let Some(phone) = &args.phone {
        org = org.contact_point(ContactPoint::customer_service(phone));
    }
    for profile in &args.same_as {
        org = org.same_as(profile);
    }
    if args.city.is_some() || args.country.is_some() {
        org = org.address(PostalAddress {
            address_locality: args.city.clone(),
            address_country: args.country.clone(),
            ..PostalAddress::default()
        });
    }
    org
}

pub fn build_faq(args: &FaqArgs) -> FaqPage {
    args.entries
        .iter()
        .fold(FaqPage::new(), |page, (question, answer)| {
            page.question(question, answer)
        })
}

pub fn build_breadcrumb(args: &BreadcrumbArgs) -> BreadcrumbList {
    let mut list = BreadcrumbList::new();
    for (name, url) in &args.items {
        list.push(name, url.clone());
    }
    list
}

/// Build the requested record and serialize it
pub fn render(args: &SchemaArgs) -> Result<String> {
    match &args.kind {
        SchemaKind::Article(a) => emit(&build_article(a), args.script),
        SchemaKind::Product(p) => emit(&build_product(p), args.script),
        SchemaKind::Organization(o) => emit(&build_organization(o), args.script),
        SchemaKind::Faq(f) => emit(&build_faq(f), args.script),
        SchemaKind::Breadcrumb(b) => emit(&build_breadcrumb(b), args.script),
    }
}

fn emit<T: JsonLd>(record: &T, script: bool) -> Result<String> {
    let missing = record.missing_required();
    if !missing.is_empty() {
        tracing::warn!(missing = ?missing, "markup is missing required properties");
    }
    let output = if script {
        record.to_script_tag()
    } else {
        record.to_pretty_json()
    };
    output.context("failed to serialize schema markup")
}
