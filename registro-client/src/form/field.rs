//! Form fields and the in-progress record
//!
//! Values are normalized on every `set`; anything that does not belong to
//! its option set or catalog is rejected and the previous value is kept.

use super::Step;
use chrono::NaiveDate;
use shared::catalog::countries::{self, PhoneCountry};
use shared::catalog::regions;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::format::title_case;
use shared::models::{
    Afc, Banco, EmpleadoInput, EstadoCivil, FondoCotizacion, ProjectTag, Salud, Sexo,
    TallaInferior, TallaSuperior, TipoCuenta, parse_talla_zapato,
};
use shared::util::digits_only;
use std::fmt;

/// Every input of the registration form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Nombre,
    Apellido,
    SegundoApellido,
    NumeroDocumento,
    FechaNacimiento,
    Sexo,
    EstadoCivil,
    PaisNacimiento,
    TelefonoParticular,
    EmailPersonal,
    Calle,
    NumeroCalle,
    DeptoOficina,
    Ciudad,
    Comuna,
    ContactoEmergenciaNombre,
    ContactoEmergenciaTelefono,
    Banco,
    TipoCuenta,
    NumeroCuenta,
    FondoCotizacion,
    Salud,
    Afc,
    TallaSuperior,
    TallaInferior,
    TallaZapato,
}

impl Field {
    /// Column the value ends up in
    pub fn column(&self) -> &'static str {
        match self {
            Field::Nombre => "nombre",
            Field::Apellido => "apellido",
            Field::SegundoApellido => "segundo_apellido",
            Field::NumeroDocumento => "numero_documento",
            Field::FechaNacimiento => "fecha_nacimiento",
            Field::Sexo => "sexo",
            Field::EstadoCivil => "estado_civil",
            Field::PaisNacimiento => "pais_nacimiento",
            Field::TelefonoParticular => "telefono_particular",
            Field::EmailPersonal => "email_personal",
            Field::Calle => "calle",
            Field::NumeroCalle => "numero_calle",
            Field::DeptoOficina => "depto_oficina",
            Field::Ciudad => "ciudad",
            Field::Comuna => "comuna",
            Field::ContactoEmergenciaNombre => "contacto_emergencia_nombre",
            Field::ContactoEmergenciaTelefono => "contacto_emergencia_telefono",
            Field::Banco => "banco",
            Field::TipoCuenta => "tipo_cuenta",
            Field::NumeroCuenta => "numero_cuenta",
            Field::FondoCotizacion => "fondo_cotizacion",
            Field::Salud => "salud",
            Field::Afc => "afc",
            Field::TallaSuperior => "talla_superior",
            Field::TallaInferior => "talla_inferior",
            Field::TallaZapato => "talla_zapato",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Field::Nombre => "Nombre",
            Field::Apellido => "Apellido",
            Field::SegundoApellido => "Segundo apellido",
            Field::NumeroDocumento => "Número de documento",
            Field::FechaNacimiento => "Fecha de nacimiento",
            Field::Sexo => "Sexo",
            Field::EstadoCivil => "Estado civil",
            Field::PaisNacimiento => "País de nacimiento",
            Field::TelefonoParticular => "Teléfono",
            Field::EmailPersonal => "Email",
            Field::Calle => "Calle",
            Field::NumeroCalle => "Número",
            Field::DeptoOficina => "Depto / Oficina",
            Field::Ciudad => "Región",
            Field::Comuna => "Comuna",
            Field::ContactoEmergenciaNombre => "Nombre de contacto",
            Field::ContactoEmergenciaTelefono => "Teléfono de contacto",
            Field::Banco => "Banco",
            Field::TipoCuenta => "Tipo de cuenta",
            Field::NumeroCuenta => "Número de cuenta",
            Field::FondoCotizacion => "AFP",
            Field::Salud => "Salud",
            Field::Afc => "AFC",
            Field::TallaSuperior => "Talla superior",
            Field::TallaInferior => "Talla inferior",
            Field::TallaZapato => "Talla de zapato",
        }
    }

    pub fn step(&self) -> Step {
        match self {
            Field::Nombre
            | Field::Apellido
            | Field::SegundoApellido
            | Field::NumeroDocumento
            | Field::FechaNacimiento
            | Field::Sexo
            | Field::EstadoCivil
            | Field::PaisNacimiento => Step::Personal,
            Field::TelefonoParticular | Field::EmailPersonal => Step::Contacto,
            Field::Calle
            | Field::NumeroCalle
            | Field::DeptoOficina
            | Field::Ciudad
            | Field::Comuna => Step::Direccion,
            Field::ContactoEmergenciaNombre | Field::ContactoEmergenciaTelefono => {
                Step::Emergencia
            }
            Field::Banco | Field::TipoCuenta | Field::NumeroCuenta => Step::Bancario,
            Field::FondoCotizacion | Field::Salud | Field::Afc => Step::Prevision,
            Field::TallaSuperior | Field::TallaInferior | Field::TallaZapato => Step::Tallas,
        }
    }

    pub fn is_required(&self) -> bool {
        !matches!(
            self,
            Field::SegundoApellido | Field::NumeroCalle | Field::DeptoOficina
        )
    }

    pub fn is_phone(&self) -> bool {
        matches!(
            self,
            Field::TelefonoParticular | Field::ContactoEmergenciaTelefono
        )
    }

    /// Stored strings accepted by a select field, `None` for free text
    pub fn options(&self) -> Option<Vec<&'static str>> {
        fn labels<T: Copy>(all: &[T], label: fn(&T) -> &'static str) -> Vec<&'static str> {
            all.iter().map(label).collect()
        }
        let list = match self {
            Field::Sexo => labels(Sexo::ALL, Sexo::as_str),
            Field::EstadoCivil => labels(EstadoCivil::ALL, EstadoCivil::as_str),
            Field::PaisNacimiento => countries::BIRTH_COUNTRIES.iter().map(|c| c.code).collect(),
            Field::Ciudad => regions::regions().iter().map(|r| r.name).collect(),
            Field::Banco => labels(Banco::ALL, Banco::as_str),
            Field::TipoCuenta => labels(TipoCuenta::ALL, TipoCuenta::as_str),
            Field::FondoCotizacion => labels(FondoCotizacion::ALL, FondoCotizacion::as_str),
            Field::Salud => labels(Salud::ALL, Salud::as_str),
            Field::Afc => labels(Afc::ALL, Afc::as_str),
            Field::TallaSuperior => labels(TallaSuperior::ALL, TallaSuperior::as_str),
            Field::TallaInferior => labels(TallaInferior::ALL, TallaInferior::as_str),
            Field::TallaZapato => shared::models::TALLAS_ZAPATO
                .map(|n| SHOE_LABELS[(n - 36) as usize])
                .collect(),
            _ => return None,
        };
        Some(list)
    }
}

const SHOE_LABELS: [&str; 11] = ["36", "37", "38", "39", "40", "41", "42", "43", "44", "45", "46"];

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Phone entered as dial country plus local digits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneValue {
    pub country: &'static PhoneCountry,
    pub digits: String,
}

impl Default for PhoneValue {
    fn default() -> Self {
        Self {
            country: countries::default_phone_country(),
            digits: String::new(),
        }
    }
}

impl PhoneValue {
    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    /// `+<dial><digits>`, empty while no digits were entered
    pub fn e164(&self) -> String {
        if self.digits.is_empty() {
            String::new()
        } else {
            format!("{}{}", self.country.dial, self.digits)
        }
    }
}

/// Partially filled employee record
#[derive(Debug, Clone, PartialEq)]
pub struct FormData {
    pub nombre: String,
    pub apellido: String,
    pub segundo_apellido: String,
    pub numero_documento: String,
    pub fecha_nacimiento: Option<NaiveDate>,
    pub sexo: Option<Sexo>,
    pub estado_civil: Option<EstadoCivil>,
    pub pais_nacimiento: String,
    pub telefono_particular: PhoneValue,
    pub email_personal: String,
    pub calle: String,
    pub numero_calle: String,
    pub depto_oficina: String,
    /// Region name
    pub ciudad: String,
    pub comuna: String,
    pub contacto_emergencia_nombre: String,
    pub contacto_emergencia_telefono: PhoneValue,
    pub banco: Option<Banco>,
    pub tipo_cuenta: Option<TipoCuenta>,
    pub numero_cuenta: String,
    pub fondo_cotizacion: Option<FondoCotizacion>,
    pub salud: Option<Salud>,
    pub afc: Option<Afc>,
    pub talla_superior: Option<TallaSuperior>,
    pub talla_inferior: Option<TallaInferior>,
    pub talla_zapato: Option<u8>,
}

impl Default for FormData {
    fn default() -> Self {
        Self {
            nombre: String::new(),
            apellido: String::new(),
            segundo_apellido: String::new(),
            numero_documento: String::new(),
            fecha_nacimiento: None,
            sexo: None,
            estado_civil: None,
            pais_nacimiento: countries::DEFAULT_BIRTH_COUNTRY.to_string(),
            telefono_particular: PhoneValue::default(),
            email_personal: String::new(),
            calle: String::new(),
            numero_calle: String::new(),
            depto_oficina: String::new(),
            ciudad: String::new(),
            comuna: String::new(),
            contacto_emergencia_nombre: String::new(),
            contacto_emergencia_telefono: PhoneValue::default(),
            banco: None,
            tipo_cuenta: None,
            numero_cuenta: String::new(),
            fondo_cotizacion: None,
            salud: None,
            afc: None,
            talla_superior: None,
            talla_inferior: None,
            talla_zapato: None,
        }
    }
}

fn parse_opt<T: std::str::FromStr<Err = AppError>>(value: &str) -> AppResult<Option<T>> {
    let value = value.trim();
    if value.is_empty() {
        Ok(None)
    } else {
        value.parse().map(Some)
    }
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

impl FormData {
    /// Store a value for `field`, normalizing it first
    pub fn set(&mut self, field: Field, value: &str, today: NaiveDate) -> AppResult<()> {
        match field {
            Field::Nombre => self.nombre = title_case(value),
            Field::Apellido => self.apellido = title_case(value),
            Field::SegundoApellido => self.segundo_apellido = title_case(value),
            Field::ContactoEmergenciaNombre => self.contacto_emergencia_nombre = title_case(value),
            Field::NumeroDocumento => self.numero_documento = digits_only(value),
            Field::FechaNacimiento => self.fecha_nacimiento = parse_birth_date(value, today)?,
            Field::Sexo => self.sexo = parse_opt(value)?,
            Field::EstadoCivil => self.estado_civil = parse_opt(value)?,
            Field::PaisNacimiento => {
                let country = countries::find_country(value.trim())
                    .ok_or_else(|| AppError::invalid_option(field.column(), value.trim()))?;
                self.pais_nacimiento = country.code.to_string();
            }
            Field::TelefonoParticular => self.telefono_particular.digits = digits_only(value),
            Field::ContactoEmergenciaTelefono => {
                self.contacto_emergencia_telefono.digits = digits_only(value)
            }
            Field::EmailPersonal => self.email_personal = value.trim().to_string(),
            Field::Calle => self.calle = value.to_string(),
            Field::NumeroCalle => self.numero_calle = value.to_string(),
            Field::DeptoOficina => self.depto_oficina = value.to_string(),
            Field::Ciudad => self.set_region(value)?,
            Field::Comuna => self.set_comuna(value)?,
            Field::Banco => self.banco = parse_opt(value)?,
            Field::TipoCuenta => self.tipo_cuenta = parse_opt(value)?,
            Field::NumeroCuenta => {
                let mut digits = digits_only(value);
                if let Some(max) = self.banco.and_then(|b| b.max_account_digits()) {
                    digits.truncate(max);
                }
                self.numero_cuenta = digits;
            }
            Field::FondoCotizacion => self.fondo_cotizacion = parse_opt(value)?,
            Field::Salud => self.salud = parse_opt(value)?,
            Field::Afc => self.afc = parse_opt(value)?,
            Field::TallaSuperior => self.talla_superior = parse_opt(value)?,
            Field::TallaInferior => self.talla_inferior = parse_opt(value)?,
            Field::TallaZapato => {
                self.talla_zapato = match value.trim() {
                    "" => None,
                    v => Some(parse_talla_zapato(v)?),
                }
            }
        }
        Ok(())
    }

    /// Choose the dial country of a phone field
    pub fn set_phone_country(&mut self, field: Field, code: &str) -> AppResult<()> {
        let country = countries::find_phone_country(code)
            .ok_or_else(|| AppError::invalid_option(field.column(), code))?;
        match field {
            Field::TelefonoParticular => self.telefono_particular.country = country,
            Field::ContactoEmergenciaTelefono => self.contacto_emergencia_telefono.country = country,
            _ => return Err(AppError::invalid_request(format!("{field} no es un teléfono"))),
        }
        Ok(())
    }

    fn set_region(&mut self, value: &str) -> AppResult<()> {
        let value = value.trim();
        if value.is_empty() {
            self.ciudad.clear();
            self.comuna.clear();
            return Ok(());
        }
        let region = regions::find_region(value)
            .ok_or_else(|| AppError::invalid_option(Field::Ciudad.column(), value))?;
        self.ciudad = region.name.to_string();
        if !region.contains(&self.comuna) {
            self.comuna.clear();
        }
        Ok(())
    }

    fn set_comuna(&mut self, value: &str) -> AppResult<()> {
        let value = value.trim();
        if value.is_empty() {
            self.comuna.clear();
            return Ok(());
        }
        if !regions::is_comuna_in_region(&self.ciudad, value) {
            return Err(AppError::new(ErrorCode::CommuneNotInRegion)
                .with_detail("comuna", value)
                .with_detail("region", self.ciudad.as_str()));
        }
        self.comuna = value.to_string();
        Ok(())
    }

    /// Display value of a field, as it would be typed back in
    pub fn value(&self, field: Field) -> String {
        fn opt<T: fmt::Display>(v: &Option<T>) -> String {
            v.as_ref().map(|v| v.to_string()).unwrap_or_default()
        }
        match field {
            Field::Nombre => self.nombre.clone(),
            Field::Apellido => self.apellido.clone(),
            Field::SegundoApellido => self.segundo_apellido.clone(),
            Field::NumeroDocumento => self.numero_documento.clone(),
            Field::FechaNacimiento => self
                .fecha_nacimiento
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            Field::Sexo => opt(&self.sexo),
            Field::EstadoCivil => opt(&self.estado_civil),
            Field::PaisNacimiento => self.pais_nacimiento.clone(),
            Field::TelefonoParticular => self.telefono_particular.digits.clone(),
            Field::EmailPersonal => self.email_personal.clone(),
            Field::Calle => self.calle.clone(),
            Field::NumeroCalle => self.numero_calle.clone(),
            Field::DeptoOficina => self.depto_oficina.clone(),
            Field::Ciudad => self.ciudad.clone(),
            Field::Comuna => self.comuna.clone(),
            Field::ContactoEmergenciaNombre => self.contacto_emergencia_nombre.clone(),
            Field::ContactoEmergenciaTelefono => self.contacto_emergencia_telefono.digits.clone(),
            Field::Banco => opt(&self.banco),
            Field::TipoCuenta => opt(&self.tipo_cuenta),
            Field::NumeroCuenta => self.numero_cuenta.clone(),
            Field::FondoCotizacion => opt(&self.fondo_cotizacion),
            Field::Salud => opt(&self.salud),
            Field::Afc => opt(&self.afc),
            Field::TallaSuperior => opt(&self.talla_superior),
            Field::TallaInferior => opt(&self.talla_inferior),
            Field::TallaZapato => opt(&self.talla_zapato),
        }
    }

    pub fn is_filled(&self, field: Field) -> bool {
        !self.value(field).trim().is_empty()
    }

    /// Inline error for one field, if any
    pub fn field_error(&self, field: Field) -> Option<AppError> {
        if field.is_required() && !self.is_filled(field) {
            return Some(AppError::required(field.label()));
        }
        match field {
            Field::EmailPersonal if !self.email_personal.contains('@') => {
                Some(AppError::new(ErrorCode::InvalidEmail))
            }
            Field::NumeroCuenta => {
                let max = self.banco.and_then(|b| b.max_account_digits())?;
                (self.numero_cuenta.len() > max)
                    .then(|| AppError::new(ErrorCode::AccountNumberTooLong))
            }
            _ => None,
        }
    }

    /// `calle[ numero][, depto], comuna, region`
    pub fn direccion(&self) -> String {
        let mut street = self.calle.trim().to_string();
        if let Some(numero) = non_empty(&self.numero_calle) {
            street.push(' ');
            street.push_str(&numero);
        }
        let mut parts = vec![street];
        parts.extend(non_empty(&self.depto_oficina));
        parts.push(self.comuna.trim().to_string());
        parts.push(self.ciudad.trim().to_string());
        parts.join(", ")
    }

    /// Compose the insert payload; every required field must be present
    pub fn to_input(&self, nv: ProjectTag) -> AppResult<EmpleadoInput> {
        fn need<T>(v: Option<T>, field: Field) -> AppResult<T> {
            v.ok_or_else(|| AppError::required(field.label()))
        }
        Ok(EmpleadoInput {
            numero_documento: self.numero_documento.clone(),
            nombre: self.nombre.trim().to_string(),
            apellido: self.apellido.trim().to_string(),
            segundo_apellido: non_empty(&self.segundo_apellido),
            fecha_nacimiento: need(self.fecha_nacimiento, Field::FechaNacimiento)?,
            pais_nacimiento: self.pais_nacimiento.clone(),
            sexo: need(self.sexo, Field::Sexo)?,
            estado_civil: need(self.estado_civil, Field::EstadoCivil)?,
            telefono_particular: self.telefono_particular.e164(),
            email_personal: self.email_personal.clone(),
            calle: non_empty(&self.calle),
            numero_calle: non_empty(&self.numero_calle),
            depto_oficina: non_empty(&self.depto_oficina),
            ciudad: self.ciudad.clone(),
            comuna: self.comuna.clone(),
            direccion: self.direccion(),
            contacto_emergencia_nombre: self.contacto_emergencia_nombre.trim().to_string(),
            contacto_emergencia_telefono: self.contacto_emergencia_telefono.e164(),
            banco: need(self.banco, Field::Banco)?,
            tipo_cuenta: need(self.tipo_cuenta, Field::TipoCuenta)?,
            numero_cuenta: self.numero_cuenta.clone(),
            fondo_cotizacion: need(self.fondo_cotizacion, Field::FondoCotizacion)?,
            salud: need(self.salud, Field::Salud)?,
            afc: need(self.afc, Field::Afc)?,
            talla_superior: Some(need(self.talla_superior, Field::TallaSuperior)?),
            talla_inferior: Some(need(self.talla_inferior, Field::TallaInferior)?),
            talla_zapato: Some(need(self.talla_zapato, Field::TallaZapato)?),
            nv,
        })
    }
}

/// `YYYY-MM-DD`, strictly before `today`
fn parse_birth_date(value: &str, today: NaiveDate) -> AppResult<Option<NaiveDate>> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| AppError::new(ErrorCode::InvalidBirthDate).with_detail("value", value))?;
    if date >= today {
        return Err(AppError::new(ErrorCode::InvalidBirthDate).with_detail("value", value));
    }
    Ok(Some(date))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
    }

    #[test]
    fn test_names_title_cased() {
        let mut data = FormData::default();
        data.set(Field::Nombre, "MARÍA elena", today()).unwrap();
        data.set(Field::ContactoEmergenciaNombre, "pedro ROJAS", today()).unwrap();
        assert_eq!(data.nombre, "María Elena");
        assert_eq!(data.contacto_emergencia_nombre, "Pedro Rojas");
    }

    #[test]
    fn test_document_keeps_digits() {
        let mut data = FormData::default();
        data.set(Field::NumeroDocumento, "12.345.678-9", today()).unwrap();
        assert_eq!(data.numero_documento, "123456789");
    }

    #[test]
    fn test_bancoestado_truncates_account() {
        let mut data = FormData::default();
        data.set(Field::Banco, "BANCOESTADO", today()).unwrap();
        data.set(Field::NumeroCuenta, "1234567890", today()).unwrap();
        assert_eq!(data.numero_cuenta, "12345678");

        data.set(Field::Banco, "SANTANDER", today()).unwrap();
        data.set(Field::NumeroCuenta, "00-1234567890", today()).unwrap();
        assert_eq!(data.numero_cuenta, "001234567890");

        // switching back does not rewrite the stored number, it flags it
        data.set(Field::Banco, "BANCOESTADO", today()).unwrap();
        assert_eq!(data.numero_cuenta, "001234567890");
        assert_eq!(
            data.field_error(Field::NumeroCuenta).unwrap().code,
            ErrorCode::AccountNumberTooLong
        );
    }

    #[test]
    fn test_invalid_option_keeps_previous() {
        let mut data = FormData::default();
        data.set(Field::Salud, "Fonasa", today()).unwrap();
        let err = data.set(Field::Salud, "Isapre X", today()).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidOption);
        assert_eq!(data.salud, Some(Salud::Fonasa));

        data.set(Field::Salud, "ISALUD Isapre de Codelco", today()).unwrap();
        assert_eq!(data.value(Field::Salud), "ISALUD");
    }

    #[test]
    fn test_region_change_clears_foreign_commune() {
        let mut data = FormData::default();
        data.set(Field::Ciudad, "Antofagasta", today()).unwrap();
        data.set(Field::Comuna, "Calama", today()).unwrap();

        let err = data.set(Field::Comuna, "Providencia", today()).unwrap_err();
        assert_eq!(err.code, ErrorCode::CommuneNotInRegion);
        assert_eq!(data.comuna, "Calama");

        data.set(Field::Ciudad, "Antofagasta", today()).unwrap();
        assert_eq!(data.comuna, "Calama");
        data.set(Field::Ciudad, "Región Metropolitana de Santiago", today()).unwrap();
        assert_eq!(data.comuna, "");
    }

    #[test]
    fn test_birth_date() {
        let mut data = FormData::default();
        data.set(Field::FechaNacimiento, "1990-05-17", today()).unwrap();
        assert_eq!(data.value(Field::FechaNacimiento), "1990-05-17");

        for bad in ["17-05-1990", "2025-03-01", "2030-01-01"] {
            let err = data.set(Field::FechaNacimiento, bad, today()).unwrap_err();
            assert_eq!(err.code, ErrorCode::InvalidBirthDate);
        }
    }

    #[test]
    fn test_phone_e164() {
        let mut data = FormData::default();
        data.set(Field::TelefonoParticular, "9 1234 5678", today()).unwrap();
        assert_eq!(data.telefono_particular.e164(), "+56912345678");

        data.set_phone_country(Field::TelefonoParticular, "PE").unwrap();
        assert_eq!(data.telefono_particular.e164(), "+51912345678");
        assert!(data.set_phone_country(Field::Calle, "PE").is_err());
        assert!(data.contacto_emergencia_telefono.e164().is_empty());
    }

    #[test]
    fn test_email_error() {
        let mut data = FormData::default();
        assert_eq!(
            data.field_error(Field::EmailPersonal).unwrap().code,
            ErrorCode::RequiredField
        );
        data.set(Field::EmailPersonal, "maria.example.com", today()).unwrap();
        let err = data.field_error(Field::EmailPersonal).unwrap();
        assert_eq!(err.message, "Debe contener @");
    }

    #[test]
    fn test_direccion_format() {
        let mut data = FormData::default();
        data.set(Field::Ciudad, "Antofagasta", today()).unwrap();
        data.set(Field::Comuna, "Calama", today()).unwrap();
        data.set(Field::Calle, " Av. Grecia ", today()).unwrap();
        assert_eq!(data.direccion(), "Av. Grecia, Calama, Antofagasta");

        data.set(Field::NumeroCalle, "1500", today()).unwrap();
        data.set(Field::DeptoOficina, "Depto 4B", today()).unwrap();
        assert_eq!(data.direccion(), "Av. Grecia 1500, Depto 4B, Calama, Antofagasta");
    }

    #[test]
    fn test_options_listing() {
        assert_eq!(Field::Sexo.options().unwrap(), ["Masculino", "Femenino"]);
        assert_eq!(Field::TallaZapato.options().unwrap().len(), 11);
        assert_eq!(Field::Ciudad.options().unwrap().len(), 16);
        assert!(Field::Nombre.options().is_none());
    }
}
