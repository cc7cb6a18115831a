use async_trait::async_trait;
use auth::Role;
use chrono::DateTime;
use chrono::Utc;
use sqlx::postgres::PgArguments;
use sqlx::query::QueryAs;
use sqlx::PgPool;
use sqlx::Postgres;
use uuid::Uuid;

use crate::domain::expert::errors::ExpertError;
use crate::domain::expert::models::ExpertQuery;
use crate::domain::expert::ports::ExpertDirectory;
use crate::domain::identity::models::Account;
use crate::domain::identity::models::ContactAddress;
use crate::domain::identity::models::EmailAddress;
use crate::domain::identity::models::Expert;
use crate::domain::identity::models::Identity;
use crate::domain::identity::models::IdentityId;
use crate::domain::identity::models::PhoneNumber;
use crate::domain::identity::ports::CredentialStore;
use crate::domain::identity::errors::IdentityError;

const ACCOUNT_COLUMNS: &str = "id, name, email, phone, address, password_hash, created_at";
const EXPERT_COLUMNS: &str =
    "id, name, phone, expertise, languages, available, password_hash, created_at";

#[derive(Debug, sqlx::FromRow)]
struct AccountRecord {
    id: Uuid,
    name: String,
    email: String,
    phone: String,
    address: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<AccountRecord> for Account {
    type Error = IdentityError;

    fn try_from(r: AccountRecord) -> Result<Self, Self::Error> {
        Ok(Account {
            id: IdentityId(r.id),
            name: r.name,
            email: EmailAddress::new(r.email)?,
            phone: r.phone,
            address: r.address,
            password_hash: r.password_hash,
            created_at: r.created_at,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ExpertRecord {
    id: Uuid,
    name: String,
    phone: String,
    expertise: Vec<String>,
    languages: Vec<String>,
    available: bool,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<ExpertRecord> for Expert {
    type Error = IdentityError;

    fn try_from(r: ExpertRecord) -> Result<Self, Self::Error> {
        Ok(Expert {
            id: IdentityId(r.id),
            name: r.name,
            phone: PhoneNumber::new(r.phone)?,
            expertise: r.expertise,
            languages: r.languages,
            available: r.available,
            password_hash: r.password_hash,
            created_at: r.created_at,
        })
    }
}

fn database_error(e: sqlx::Error) -> IdentityError {
    IdentityError::DatabaseError(e.to_string())
}

/// Unique violations on the contact column become `DuplicateContact`.
fn create_error(e: sqlx::Error, constraint: &str, contact: &str) -> IdentityError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() && db_err.constraint() == Some(constraint) {
            return IdentityError::DuplicateContact(contact.to_string());
        }
    }
    database_error(e)
}

pub struct PostgresIdentityRepository {
    pool: PgPool,
}

impl PostgresIdentityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_account(&self, lookup: Lookup<'_>) -> Result<Option<Identity>, IdentityError> {
        let query = format!(
            "SELECT {} FROM accounts WHERE {} = $1",
            ACCOUNT_COLUMNS,
            lookup.column("email")
        );

        lookup
            .bind(sqlx::query_as::<_, AccountRecord>(&query))
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error)?
            .map(|r| Account::try_from(r).map(Identity::Account))
            .transpose()
    }

    async fn find_expert(&self, lookup: Lookup<'_>) -> Result<Option<Identity>, IdentityError> {
        let query = format!(
            "SELECT {} FROM experts WHERE {} = $1",
            EXPERT_COLUMNS,
            lookup.column("phone")
        );

        lookup
            .bind(sqlx::query_as::<_, ExpertRecord>(&query))
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error)?
            .map(|r| Expert::try_from(r).map(Identity::Expert))
            .transpose()
    }
}

/// Single-row lookup key.
#[derive(Clone, Copy)]
enum Lookup<'a> {
    Id(Uuid),
    Contact(&'a str),
}

impl<'a> Lookup<'a> {
    fn column(&self, contact_column: &'static str) -> &'static str {
        match self {
            Lookup::Id(_) => "id",
            Lookup::Contact(_) => contact_column,
        }
    }

    fn bind<'q, O>(
        self,
        query: QueryAs<'q, Postgres, O, PgArguments>,
    ) -> QueryAs<'q, Postgres, O, PgArguments>
    where
        'a: 'q,
    {
        match self {
            Lookup::Id(id) => query.bind(id),
            Lookup::Contact(contact) => query.bind(contact),
        }
    }
}

#[async_trait]
impl CredentialStore for PostgresIdentityRepository {
    async fn create(&self, identity: Identity) -> Result<Identity, IdentityError> {
        match &identity {
            Identity::Account(account) => {
                sqlx::query(
                    r#"
                    INSERT INTO accounts (id, name, email, phone, address, password_hash, created_at)
                    VALUES ($1, $2, $3, $4, $5, $6, $7)
                    "#,
                )
                .bind(account.id.0)
                .bind(&account.name)
                .bind(account.email.as_str())
                .bind(&account.phone)
                .bind(&account.address)
                .bind(&account.password_hash)
                .bind(account.created_at)
                .execute(&self.pool)
                .await
                .map_err(|e| create_error(e, "accounts_email_key", account.email.as_str()))?;
            }
            Identity::Expert(expert) => {
                sqlx::query(
                    r#"
                    INSERT INTO experts (id, name, phone, expertise, languages, available, password_hash, created_at)
                    VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                    "#,
                )
                .bind(expert.id.0)
                .bind(&expert.name)
                .bind(expert.phone.as_str())
                .bind(&expert.expertise)
                .bind(&expert.languages)
                .bind(expert.available)
                .bind(&expert.password_hash)
                .bind(expert.created_at)
                .execute(&self.pool)
                .await
                .map_err(|e| create_error(e, "experts_phone_key", expert.phone.as_str()))?;
            }
        }

        Ok(identity)
    }

    async fn find_by_contact(
        &self,
        contact: &ContactAddress,
    ) -> Result<Option<Identity>, IdentityError> {
        match contact {
            ContactAddress::Email(email) => {
                self.find_account(Lookup::Contact(email.as_str())).await
            }
            ContactAddress::Phone(phone) => {
                self.find_expert(Lookup::Contact(phone.as_str())).await
            }
        }
    }

    async fn find_by_id(
        &self,
        role: Role,
        id: &IdentityId,
    ) -> Result<Option<Identity>, IdentityError> {
        match role {
            Role::Account => self.find_account(Lookup::Id(id.0)).await,
            Role::Expert => self.find_expert(Lookup::Id(id.0)).await,
        }
    }

    async fn set_availability(
        &self,
        id: &IdentityId,
        available: bool,
    ) -> Result<Option<Expert>, IdentityError> {
        let query = format!(
            "UPDATE experts SET available = $2 WHERE id = $1 RETURNING {}",
            EXPERT_COLUMNS
        );

        sqlx::query_as::<_, ExpertRecord>(&query)
            .bind(id.0)
            .bind(available)
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error)?
            .map(Expert::try_from)
            .transpose()
    }
}

#[async_trait]
impl ExpertDirectory for PostgresIdentityRepository {
    async fn find_available(&self, query: &ExpertQuery) -> Result<Vec<Expert>, ExpertError> {
        let sql = format!(
            r#"
            SELECT {}
            FROM experts
            WHERE available = TRUE
              AND ($1::TEXT IS NULL OR EXISTS (
                  SELECT 1 FROM unnest(expertise) AS tag WHERE strpos(lower(tag), lower($1)) > 0))
              AND ($2::TEXT IS NULL OR EXISTS (
                  SELECT 1 FROM unnest(languages) AS tag WHERE strpos(lower(tag), lower($2)) > 0))
            ORDER BY created_at
            "#,
            EXPERT_COLUMNS
        );

        let rows = sqlx::query_as::<_, ExpertRecord>(&sql)
            .bind(query.topic.as_deref())
            .bind(query.language.as_deref())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| ExpertError::DatabaseError(e.to_string()))?;

        rows.into_iter()
            .map(|r| Expert::try_from(r).map_err(|e| ExpertError::DatabaseError(e.to_string())))
            .collect()
    }
}
