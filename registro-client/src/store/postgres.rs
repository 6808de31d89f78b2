//! Direct Postgres backend (sqlx)

use super::{Backend, SqlBuilder};
use crate::error::{ClientError, ClientResult};
use crate::query::QueryPlan;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use shared::models::{Empleado, EmpleadoInput};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

/// Column list shared by INSERT ... RETURNING
const INSERT_SQL: &str = r#"
    INSERT INTO empleados (
        numero_documento, nombre, apellido, segundo_apellido, fecha_nacimiento,
        pais_nacimiento, sexo, estado_civil, telefono_particular, email_personal,
        calle, numero_calle, depto_oficina, ciudad, comuna, direccion,
        contacto_emergencia_nombre, contacto_emergencia_telefono,
        banco, tipo_cuenta, numero_cuenta, fondo_cotizacion, salud, afc,
        talla_superior, talla_inferior, talla_zapato, nv
    )
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14,
            $15, $16, $17, $18, $19, $20, $21, $22, $23, $24, $25, $26, $27, $28)
    RETURNING *
"#;

/// Row as read from Postgres; option columns are plain text
#[derive(sqlx::FromRow)]
struct EmpleadoRow {
    id: Uuid,
    numero_documento: String,
    nombre: String,
    apellido: String,
    segundo_apellido: Option<String>,
    fecha_nacimiento: NaiveDate,
    pais_nacimiento: String,
    sexo: String,
    estado_civil: String,
    telefono_particular: String,
    email_personal: String,
    calle: Option<String>,
    numero_calle: Option<String>,
    depto_oficina: Option<String>,
    ciudad: String,
    comuna: String,
    direccion: String,
    contacto_emergencia_nombre: String,
    contacto_emergencia_telefono: String,
    banco: String,
    tipo_cuenta: String,
    numero_cuenta: String,
    fondo_cotizacion: String,
    salud: String,
    afc: String,
    talla_superior: Option<String>,
    talla_inferior: Option<String>,
    talla_zapato: Option<i16>,
    nv: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<EmpleadoRow> for Empleado {
    type Error = ClientError;

    fn try_from(row: EmpleadoRow) -> Result<Self, Self::Error> {
        let id = row.id;
        let invalid = |e: shared::AppError| ClientError::InvalidResponse(format!("row {id}: {e}"));
        Ok(Self {
            id,
            numero_documento: row.numero_documento,
            nombre: row.nombre,
            apellido: row.apellido,
            segundo_apellido: row.segundo_apellido,
            fecha_nacimiento: row.fecha_nacimiento,
            pais_nacimiento: row.pais_nacimiento,
            sexo: row.sexo.parse().map_err(invalid)?,
            estado_civil: row.estado_civil.parse().map_err(invalid)?,
            telefono_particular: row.telefono_particular,
            email_personal: row.email_personal,
            calle: row.calle,
            numero_calle: row.numero_calle,
            depto_oficina: row.depto_oficina,
            ciudad: row.ciudad,
            comuna: row.comuna,
            direccion: row.direccion,
            contacto_emergencia_nombre: row.contacto_emergencia_nombre,
            contacto_emergencia_telefono: row.contacto_emergencia_telefono,
            banco: row.banco.parse().map_err(invalid)?,
            tipo_cuenta: row.tipo_cuenta.parse().map_err(invalid)?,
            numero_cuenta: row.numero_cuenta,
            fondo_cotizacion: row.fondo_cotizacion.parse().map_err(invalid)?,
            salud: row.salud.parse().map_err(invalid)?,
            afc: row.afc.parse().map_err(invalid)?,
            talla_superior: row.talla_superior.map(|s| s.parse()).transpose().map_err(invalid)?,
            talla_inferior: row.talla_inferior.map(|s| s.parse()).transpose().map_err(invalid)?,
            talla_zapato: row.talla_zapato.and_then(|n| u8::try_from(n).ok()),
            nv: row.nv,
            created_at: Some(row.created_at),
        })
    }
}

/// Postgres store reached through `DATABASE_URL`
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Connect and bring the schema up to date
    pub async fn connect(database_url: &str, max_connections: u32) -> ClientResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Postgres store ready");
        Ok(Self { pool })
    }
}

#[async_trait]
impl Backend for PgStore {
    fn name(&self) -> &'static str {
        "postgres"
    }

    async fn fetch_page(&self, plan: &QueryPlan) -> ClientResult<(Vec<Empleado>, u64)> {
        let builder = SqlBuilder::from_plan(plan);

        let select_sql = builder.select_sql(plan);
        let rows: Vec<EmpleadoRow> = builder
            .apply_bindings(sqlx::query_as(&select_sql))
            .fetch_all(&self.pool)
            .await?;

        let count_sql = builder.count_sql();
        let total: i64 = builder
            .apply_bindings_scalar(sqlx::query_scalar(&count_sql))
            .fetch_one(&self.pool)
            .await?;

        let data = rows
            .into_iter()
            .map(Empleado::try_from)
            .collect::<ClientResult<Vec<_>>>()?;
        Ok((data, total.max(0) as u64))
    }

    async fn insert_row(&self, input: &EmpleadoInput) -> ClientResult<Empleado> {
        let row: EmpleadoRow = sqlx::query_as(INSERT_SQL)
            .bind(&input.numero_documento)
            .bind(&input.nombre)
            .bind(&input.apellido)
            .bind(&input.segundo_apellido)
            .bind(input.fecha_nacimiento)
            .bind(&input.pais_nacimiento)
            .bind(input.sexo.as_str())
            .bind(input.estado_civil.as_str())
            .bind(&input.telefono_particular)
            .bind(&input.email_personal)
            .bind(&input.calle)
            .bind(&input.numero_calle)
            .bind(&input.depto_oficina)
            .bind(&input.ciudad)
            .bind(&input.comuna)
            .bind(&input.direccion)
            .bind(&input.contacto_emergencia_nombre)
            .bind(&input.contacto_emergencia_telefono)
            .bind(input.banco.as_str())
            .bind(input.tipo_cuenta.as_str())
            .bind(&input.numero_cuenta)
            .bind(input.fondo_cotizacion.as_str())
            .bind(input.salud.as_str())
            .bind(input.afc.as_str())
            .bind(input.talla_superior.map(|t| t.as_str()))
            .bind(input.talla_inferior.map(|t| t.as_str()))
            .bind(input.talla_zapato.map(i16::from))
            .bind(input.nv.as_str())
            .fetch_one(&self.pool)
            .await?;
        Empleado::try_from(row)
    }

    async fn fetch_tags(&self) -> ClientResult<Vec<Option<String>>> {
        let tags: Vec<Option<String>> = sqlx::query_scalar("SELECT nv FROM empleados")
            .fetch_all(&self.pool)
            .await?;
        Ok(tags)
    }
}
