//! Employee record

use super::options::{
    Afc, Banco, EstadoCivil, FondoCotizacion, Salud, Sexo, TallaInferior, TallaSuperior, TipoCuenta,
};
use super::project::ProjectTag;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Name of the remote collection
pub const EMPLEADOS_TABLE: &str = "empleados";

/// Employee row as stored in `empleados`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Empleado {
    pub id: Uuid,

    // Identity
    pub numero_documento: String,
    pub nombre: String,
    pub apellido: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segundo_apellido: Option<String>,
    pub fecha_nacimiento: NaiveDate,
    /// ISO 3166-1 alpha-2
    pub pais_nacimiento: String,
    pub sexo: Sexo,
    pub estado_civil: EstadoCivil,

    // Contact
    /// E.164
    pub telefono_particular: String,
    pub email_personal: String,
    #[serde(default)]
    pub calle: Option<String>,
    #[serde(default)]
    pub numero_calle: Option<String>,
    #[serde(default)]
    pub depto_oficina: Option<String>,
    /// Region name
    pub ciudad: String,
    pub comuna: String,
    pub direccion: String,

    // Emergency
    pub contacto_emergencia_nombre: String,
    pub contacto_emergencia_telefono: String,

    // Banking
    pub banco: Banco,
    pub tipo_cuenta: TipoCuenta,
    pub numero_cuenta: String,

    // Social insurance
    pub fondo_cotizacion: FondoCotizacion,
    pub salud: Salud,
    pub afc: Afc,

    // Sizes
    #[serde(default)]
    pub talla_superior: Option<TallaSuperior>,
    #[serde(default)]
    pub talla_inferior: Option<TallaInferior>,
    #[serde(default)]
    pub talla_zapato: Option<u8>,

    /// Raw project tag; legacy rows may have none
    #[serde(default)]
    pub nv: Option<String>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Empleado {
    /// Project tag, with legacy rows mapped to the sentinel
    pub fn project_tag(&self) -> ProjectTag {
        ProjectTag::from_stored(self.nv.as_deref())
    }

    /// Build the stored row from an insert payload
    pub fn from_input(id: Uuid, input: EmpleadoInput, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            numero_documento: input.numero_documento,
            nombre: input.nombre,
            apellido: input.apellido,
            segundo_apellido: input.segundo_apellido,
            fecha_nacimiento: input.fecha_nacimiento,
            pais_nacimiento: input.pais_nacimiento,
            sexo: input.sexo,
            estado_civil: input.estado_civil,
            telefono_particular: input.telefono_particular,
            email_personal: input.email_personal,
            calle: input.calle,
            numero_calle: input.numero_calle,
            depto_oficina: input.depto_oficina,
            ciudad: input.ciudad,
            comuna: input.comuna,
            direccion: input.direccion,
            contacto_emergencia_nombre: input.contacto_emergencia_nombre,
            contacto_emergencia_telefono: input.contacto_emergencia_telefono,
            banco: input.banco,
            tipo_cuenta: input.tipo_cuenta,
            numero_cuenta: input.numero_cuenta,
            fondo_cotizacion: input.fondo_cotizacion,
            salud: input.salud,
            afc: input.afc,
            talla_superior: input.talla_superior,
            talla_inferior: input.talla_inferior,
            talla_zapato: input.talla_zapato,
            nv: Some(input.nv.into()),
            created_at: Some(created_at),
        }
    }
}

/// Insert payload (no `id`, no `created_at`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmpleadoInput {
    pub numero_documento: String,
    pub nombre: String,
    pub apellido: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segundo_apellido: Option<String>,
    pub fecha_nacimiento: NaiveDate,
    pub pais_nacimiento: String,
    pub sexo: Sexo,
    pub estado_civil: EstadoCivil,
    pub telefono_particular: String,
    pub email_personal: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numero_calle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depto_oficina: Option<String>,
    pub ciudad: String,
    pub comuna: String,
    pub direccion: String,
    pub contacto_emergencia_nombre: String,
    pub contacto_emergencia_telefono: String,
    pub banco: Banco,
    pub tipo_cuenta: TipoCuenta,
    pub numero_cuenta: String,
    pub fondo_cotizacion: FondoCotizacion,
    pub salud: Salud,
    pub afc: Afc,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub talla_superior: Option<TallaSuperior>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub talla_inferior: Option<TallaInferior>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub talla_zapato: Option<u8>,
    pub nv: ProjectTag,
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_serializes_stored_strings() {
        let json = serde_json::to_value(fixtures::input()).unwrap();
        assert_eq!(json["banco"], "BANCOESTADO");
        assert_eq!(json["estado_civil"], "Soltero/a");
        assert_eq!(json["talla_inferior"], "42 (M)");
        assert_eq!(json["fecha_nacimiento"], "1990-05-17");
        assert_eq!(json["nv"], "NV499");
        assert!(json.get("segundo_apellido").is_none());
        assert!(json.get("id").is_none());
    }

    #[test]
    fn test_row_from_rest_payload() {
        let mut json = serde_json::to_value(fixtures::input()).unwrap();
        json["id"] = "5b0a4f38-7c43-4c64-9d0e-0c6f4b1f9d7a".into();
        json["created_at"] = "2024-03-01T12:00:00.123456+00:00".into();
        json["nv"] = serde_json::Value::Null;

        let row: Empleado = serde_json::from_value(json).unwrap();
        assert_eq!(row.nombre, "María Elena");
        assert!(row.project_tag().is_sentinel());
        assert!(row.created_at.is_some());
    }

    #[test]
    fn test_from_input_keeps_tag() {
        let row = Empleado::from_input(Uuid::new_v4(), fixtures::input(), Utc::now());
        assert_eq!(row.nv.as_deref(), Some("NV499"));
        assert_eq!(row.project_tag().as_str(), "NV499");
    }
}
