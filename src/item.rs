pub mod wire;

use crate::client::error::ApiError;
use serde::Serialize;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use tracing::warn;
use wire::{ReviewRecord, SetRecord};

/// Brickset에 등록된 레고 세트
///
/// 가격은 원격 서비스가 반환한 문자열을 그대로 보존한다.
/// 값이 없는 필드는 `None`이다.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Build {
    set_id: u64,
    number: String,
    variant: u32,
    name: String,
    year: Option<String>,
    theme: Option<String>,
    theme_group: Option<String>,
    subtheme: Option<String>,
    pieces: Option<u32>,
    minifigs: Option<u32>,
    image_url: Option<String>,
    thumbnail_url: Option<String>,
    brickset_url: Option<String>,
    released: Option<bool>,
    owned: Option<bool>,
    wanted: Option<bool>,
    qty_owned: Option<u32>,
    user_notes: Option<String>,
    price_uk: Option<String>,
    price_us: Option<String>,
    price_ca: Option<String>,
    price_eu: Option<String>,
    rating: Option<f32>,
}

impl Build {
    pub fn set_id(&self) -> u64 {
        self.set_id
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn variant(&self) -> u32 {
        self.variant
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn year(&self) -> Option<&str> {
        self.year.as_deref()
    }

    pub fn theme(&self) -> Option<&str> {
        self.theme.as_deref()
    }

    pub fn theme_group(&self) -> Option<&str> {
        self.theme_group.as_deref()
    }

    pub fn subtheme(&self) -> Option<&str> {
        self.subtheme.as_deref()
    }

    pub fn pieces(&self) -> Option<u32> {
        self.pieces
    }

    pub fn minifigs(&self) -> Option<u32> {
        self.minifigs
    }

    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    pub fn thumbnail_url(&self) -> Option<&str> {
        self.thumbnail_url.as_deref()
    }

    pub fn brickset_url(&self) -> Option<&str> {
        self.brickset_url.as_deref()
    }

    pub fn released(&self) -> Option<bool> {
        self.released
    }

    /// 사용자 해시와 함께 조회한 경우에만 값이 있다.
    pub fn owned(&self) -> Option<bool> {
        self.owned
    }

    pub fn wanted(&self) -> Option<bool> {
        self.wanted
    }

    pub fn qty_owned(&self) -> Option<u32> {
        self.qty_owned
    }

    pub fn user_notes(&self) -> Option<&str> {
        self.user_notes.as_deref()
    }

    pub fn price_uk(&self) -> Option<&str> {
        self.price_uk.as_deref()
    }

    pub fn price_us(&self) -> Option<&str> {
        self.price_us.as_deref()
    }

    pub fn price_ca(&self) -> Option<&str> {
        self.price_ca.as_deref()
    }

    pub fn price_eu(&self) -> Option<&str> {
        self.price_eu.as_deref()
    }

    pub fn rating(&self) -> Option<f32> {
        self.rating
    }
}

impl Display for Build {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{} {}", self.number, self.variant, self.name)
    }
}

impl TryFrom<SetRecord> for Build {
    type Error = ApiError;

    fn try_from(record: SetRecord) -> Result<Self, Self::Error> {
        let set_id = required(record.set_id, "set", "setID")?;

        Ok(Build {
            set_id: parse_value(&set_id, "setID")?,
            number: required(record.number, "set", "number")?,
            variant: parse_number(record.number_variant, "numberVariant")?.unwrap_or(1),
            name: required(record.name, "set", "name")?,
            year: text(record.year),
            theme: text(record.theme),
            theme_group: text(record.theme_group),
            subtheme: text(record.subtheme),
            pieces: parse_number(record.pieces, "pieces")?,
            minifigs: parse_number(record.minifigs, "minifigs")?,
            image_url: text(record.image_url),
            thumbnail_url: text(record.thumbnail_url),
            brickset_url: text(record.brickset_url),
            released: parse_flag(record.released, "released"),
            owned: parse_flag(record.owned, "owned"),
            wanted: parse_flag(record.wanted, "wanted"),
            qty_owned: parse_number(record.qty_owned, "qtyOwned")?,
            user_notes: text(record.user_notes),
            price_uk: text(record.uk_retail_price),
            price_us: text(record.us_retail_price),
            price_ca: text(record.ca_retail_price),
            price_eu: text(record.eu_retail_price),
            rating: parse_number(record.rating, "rating")?,
        })
    }
}

/// 세트에 작성된 리뷰
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Review {
    author: String,
    date_posted: Option<String>,
    overall_rating: Option<u32>,
    parts: Option<u32>,
    building_experience: Option<u32>,
    playability: Option<u32>,
    value_for_money: Option<u32>,
    title: String,
    review: Option<String>,
    html: Option<bool>,
}

impl Review {
    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn date_posted(&self) -> Option<&str> {
        self.date_posted.as_deref()
    }

    /// `date_posted`를 시각으로 변환한다. 형식이 맞지 않으면 `None`
    pub fn posted_at(&self) -> Option<chrono::NaiveDateTime> {
        self.date_posted.as_deref()
            .and_then(|s| chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f").ok())
    }

    pub fn overall_rating(&self) -> Option<u32> {
        self.overall_rating
    }

    pub fn parts(&self) -> Option<u32> {
        self.parts
    }

    pub fn building_experience(&self) -> Option<u32> {
        self.building_experience
    }

    pub fn playability(&self) -> Option<u32> {
        self.playability
    }

    pub fn value_for_money(&self) -> Option<u32> {
        self.value_for_money
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn review(&self) -> Option<&str> {
        self.review.as_deref()
    }

    /// 리뷰 본문이 HTML인지 여부
    pub fn html(&self) -> Option<bool> {
        self.html
    }
}

impl Display for Review {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} by {}", self.title, self.author)
    }
}

impl TryFrom<ReviewRecord> for Review {
    type Error = ApiError;

    fn try_from(record: ReviewRecord) -> Result<Self, Self::Error> {
        Ok(Review {
            author: required(record.author, "review", "author")?,
            date_posted: text(record.date_posted),
            overall_rating: parse_number(record.overall_rating, "overallRating")?,
            parts: parse_number(record.parts, "parts")?,
            building_experience: parse_number(record.building_experience, "buildingExperience")?,
            playability: parse_number(record.playability, "playability")?,
            value_for_money: parse_number(record.value_for_money, "valueForMoney")?,
            title: required(record.title, "review", "title")?,
            review: text(record.review),
            html: parse_flag(record.html, "HTML"),
        })
    }
}

/// 빈 문자열은 값이 없는 것으로 본다.
fn text(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn required(value: Option<String>, record: &'static str, field: &'static str) -> Result<String, ApiError> {
    text(value).ok_or(ApiError::MissingField { record, field })
}

fn parse_value<T: FromStr>(value: &str, field: &'static str) -> Result<T, ApiError> {
    value.trim().parse::<T>()
        .map_err(|_| ApiError::InvalidField { field, value: value.to_owned() })
}

fn parse_number<T: FromStr>(value: Option<String>, field: &'static str) -> Result<Option<T>, ApiError> {
    text(value).map(|v| parse_value(&v, field)).transpose()
}

/// Brickset은 플래그를 `true`/`false` 또는 `1`/`0`으로 내려준다.
fn parse_flag(value: Option<String>, field: &'static str) -> Option<bool> {
    let value = text(value)?;
    match value.trim().to_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" | "none" => Some(false),
        _ => {
            warn!(field, value = value.as_str(), "unknown flag value");
            None
        }
    }
}
