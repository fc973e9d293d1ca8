use crate::client::error::RequestError;
use std::fmt;
use std::str::FromStr;

/// 페이지당 기본 결과 수
pub const DEFAULT_PAGE_SIZE: i32 = 20;
/// 검색 결과 기본 페이지 번호
pub const DEFAULT_PAGE_NUMBER: i32 = 1;

/// Brickset `getSets`의 정렬 기준
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    Number,
    YearFrom,
    Pieces,
    Minifigs,
    Rating,
    UKRetailPrice,
    USRetailPrice,
    CARetailPrice,
    EURetailPrice,
    Theme,
    Subtheme,
    Name,
    Random,
}

impl SortField {
    const ALL: [SortField; 13] = [
        SortField::Number,
        SortField::YearFrom,
        SortField::Pieces,
        SortField::Minifigs,
        SortField::Rating,
        SortField::UKRetailPrice,
        SortField::USRetailPrice,
        SortField::CARetailPrice,
        SortField::EURetailPrice,
        SortField::Theme,
        SortField::Subtheme,
        SortField::Name,
        SortField::Random,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Number => "Number",
            SortField::YearFrom => "YearFrom",
            SortField::Pieces => "Pieces",
            SortField::Minifigs => "Minifigs",
            SortField::Rating => "Rating",
            SortField::UKRetailPrice => "UKRetailPrice",
            SortField::USRetailPrice => "USRetailPrice",
            SortField::CARetailPrice => "CARetailPrice",
            SortField::EURetailPrice => "EURetailPrice",
            SortField::Theme => "Theme",
            SortField::Subtheme => "Subtheme",
            SortField::Name => "Name",
            SortField::Random => "Random",
        }
    }
}

/// 정렬 기준과 방향. 내림차순은 필드명 뒤에 `DESC`를 붙여 전송한다. (예: `NameDESC`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OrderBy {
    pub field: SortField,
    pub descending: bool,
}

impl OrderBy {
    pub fn asc(field: SortField) -> Self {
        Self { field, descending: false }
    }

    pub fn desc(field: SortField) -> Self {
        Self { field, descending: true }
    }
}

impl fmt::Display for OrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.descending {
            write!(f, "{}DESC", self.field.as_str())
        } else {
            write!(f, "{}", self.field.as_str())
        }
    }
}

impl FromStr for OrderBy {
    type Err = RequestError;

    /// 대소문자를 구분한다.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, descending) = match s.strip_suffix("DESC") {
            Some(name) => (name, true),
            None => (s, false),
        };

        SortField::ALL.iter()
            .find(|field| field.as_str() == name)
            .map(|field| OrderBy { field: *field, descending })
            .ok_or_else(|| RequestError::InvalidOrderType(s.to_owned()))
    }
}

/// `getSets` 검색 조건. 모든 조건은 선택 사항이다.
#[derive(Debug, Clone, PartialEq)]
pub struct SetQuery {
    query: Option<String>,
    theme: Option<String>,
    subtheme: Option<String>,
    set_number: Option<String>,
    year: Option<i32>,
    owned: Option<bool>,
    wanted: Option<bool>,
    user_hash: Option<String>,
    user_name: Option<String>,
    order_by: OrderBy,
    page_size: i32,
    page_number: i32,
}

impl SetQuery {
    pub fn builder() -> SetQueryBuilder {
        SetQueryBuilder::new()
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn theme(&self) -> Option<&str> {
        self.theme.as_deref()
    }

    pub fn subtheme(&self) -> Option<&str> {
        self.subtheme.as_deref()
    }

    pub fn set_number(&self) -> Option<&str> {
        self.set_number.as_deref()
    }

    pub fn year(&self) -> Option<i32> {
        self.year
    }

    pub fn owned(&self) -> Option<bool> {
        self.owned
    }

    pub fn wanted(&self) -> Option<bool> {
        self.wanted
    }

    pub fn user_hash(&self) -> Option<&str> {
        self.user_hash.as_deref()
    }

    pub fn user_name(&self) -> Option<&str> {
        self.user_name.as_deref()
    }

    pub fn order_by(&self) -> OrderBy {
        self.order_by
    }

    pub fn page_size(&self) -> i32 {
        self.page_size
    }

    pub fn page_number(&self) -> i32 {
        self.page_number
    }

    /// Brickset이 요구하는 순서대로 정렬된 쿼리 파라미터 목록.
    /// 설정 되지 않은 조건도 빈 값으로 포함 된다.
    pub(crate) fn to_pairs(&self) -> Vec<(&'static str, String)> {
        fn text(value: &Option<String>) -> String {
            value.clone().unwrap_or_default()
        }
        fn flag(value: Option<bool>) -> String {
            match value {
                Some(true) => "1".to_owned(),
                Some(false) => "0".to_owned(),
                None => String::new(),
            }
        }

        vec![
            ("userHash", text(&self.user_hash)),
            ("query", text(&self.query)),
            ("theme", text(&self.theme)),
            ("subtheme", text(&self.subtheme)),
            ("setNumber", text(&self.set_number)),
            ("year", self.year.map(|y| y.to_string()).unwrap_or_default()),
            ("owned", flag(self.owned)),
            ("wanted", flag(self.wanted)),
            ("orderBy", self.order_by.to_string()),
            ("pageSize", self.page_size.to_string()),
            ("pageNumber", self.page_number.to_string()),
            ("userName", text(&self.user_name)),
        ]
    }
}

impl Default for SetQuery {
    fn default() -> Self {
        SetQuery {
            query: None,
            theme: None,
            subtheme: None,
            set_number: None,
            year: None,
            owned: None,
            wanted: None,
            user_hash: None,
            user_name: None,
            order_by: OrderBy::default(),
            page_size: DEFAULT_PAGE_SIZE,
            page_number: DEFAULT_PAGE_NUMBER,
        }
    }
}

#[derive(Default)]
pub struct SetQueryBuilder {
    query: Option<String>,
    theme: Option<String>,
    subtheme: Option<String>,
    set_number: Option<String>,
    year: Option<i32>,
    owned: Option<bool>,
    wanted: Option<bool>,
    user_hash: Option<String>,
    user_name: Option<String>,
    order_by: Option<OrderBy>,
    page_size: Option<i32>,
    page_number: Option<i32>,
}

impl SetQueryBuilder {
    pub fn new() -> Self {
        SetQueryBuilder::default()
    }

    pub fn query<S: Into<String>>(mut self, query: S) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn theme<S: Into<String>>(mut self, theme: S) -> Self {
        self.theme = Some(theme.into());
        self
    }

    pub fn subtheme<S: Into<String>>(mut self, subtheme: S) -> Self {
        self.subtheme = Some(subtheme.into());
        self
    }

    pub fn set_number<S: Into<String>>(mut self, set_number: S) -> Self {
        self.set_number = Some(set_number.into());
        self
    }

    pub fn year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn owned(mut self, owned: bool) -> Self {
        self.owned = Some(owned);
        self
    }

    pub fn wanted(mut self, wanted: bool) -> Self {
        self.wanted = Some(wanted);
        self
    }

    /// [`crate::Client::login`]으로 얻은 사용자 해시
    pub fn user_hash<S: Into<String>>(mut self, user_hash: S) -> Self {
        self.user_hash = Some(user_hash.into());
        self
    }

    pub fn user_name<S: Into<String>>(mut self, user_name: S) -> Self {
        self.user_name = Some(user_name.into());
        self
    }

    pub fn order_by(mut self, order_by: OrderBy) -> Self {
        self.order_by = Some(order_by);
        self
    }

    pub fn page_size(mut self, page_size: i32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn page_number(mut self, page_number: i32) -> Self {
        self.page_number = Some(page_number);
        self
    }

    pub fn build(self) -> Result<SetQuery, RequestError> {
        if let Some(year) = self.year {
            if year < 1 {
                return Err(RequestError::InvalidParameter(format!("year must be greater than 0, got {}", year)));
            }
        }

        let page_size = self.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
        if page_size < 1 {
            return Err(RequestError::InvalidParameter("page size must be greater than 0".to_string()));
        }

        let page_number = self.page_number.unwrap_or(DEFAULT_PAGE_NUMBER);
        if page_number < 1 {
            return Err(RequestError::InvalidParameter("page number must be greater than 0".to_string()));
        }

        Ok(SetQuery {
            query: self.query,
            theme: self.theme,
            subtheme: self.subtheme,
            set_number: self.set_number,
            year: self.year,
            owned: self.owned,
            wanted: self.wanted,
            user_hash: self.user_hash,
            user_name: self.user_name,
            order_by: self.order_by.unwrap_or_default(),
            page_size,
            page_number,
        })
    }
}
