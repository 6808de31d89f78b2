//! Chilean regions and their communes

/// A region with its communes, in catalog order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub name: &'static str,
    pub comunas: &'static [&'static str],
}

impl Region {
    pub fn contains(&self, comuna: &str) -> bool {
        self.comunas.contains(&comuna)
    }
}

pub static REGIONES: &[Region] = &[
    Region {
        name: "Arica y Parinacota",
        comunas: &["Arica", "Camarones", "Putre", "General Lagos"],
    },
    Region {
        name: "Tarapacá",
        comunas: &[
            "Iquique", "Alto Hospicio", "Pozo Almonte", "Camiña", "Colchane", "Huara", "Pica",
        ],
    },
    Region {
        name: "Antofagasta",
        comunas: &[
            "Antofagasta", "Mejillones", "Sierra Gorda", "Taltal", "Calama", "Ollagüe",
            "San Pedro de Atacama", "Tocopilla", "María Elena",
        ],
    },
    Region {
        name: "Atacama",
        comunas: &[
            "Copiapó", "Caldera", "Tierra Amarilla", "Chañaral", "Diego de Almagro", "Vallenar",
            "Alto del Carmen", "Freirina", "Huasco",
        ],
    },
    Region {
        name: "Coquimbo",
        comunas: &[
            "La Serena", "Coquimbo", "Andacollo", "La Higuera", "Paiguano", "Vicuña", "Illapel",
            "Canela", "Los Vilos", "Salamanca", "Ovalle", "Combarbalá", "Monte Patria",
            "Punitaqui", "Río Hurtado",
        ],
    },
    Region {
        name: "Valparaíso",
        comunas: &[
            "Valparaíso", "Casablanca", "Concón", "Juan Fernández", "Puchuncaví", "Quintero",
            "Viña del Mar", "Isla de Pascua", "Los Andes", "Calle Larga", "Rinconada",
            "San Esteban", "La Ligua", "Cabildo", "Papudo", "Petorca", "Zapallar", "Quillota",
            "Calera", "Hijuelas", "La Cruz", "Nogales", "San Antonio", "Algarrobo", "Cartagena",
            "El Quisco", "El Tabo", "Santo Domingo", "San Felipe", "Catemu", "Llaillay",
            "Panquehue", "Putaendo", "Santa María", "Quilpué", "Limache", "Olmué",
            "Villa Alemana",
        ],
    },
    Region {
        name: "Región del Libertador Gral. Bernardo O’Higgins",
        comunas: &[
            "Rancagua", "Codegua", "Coinco", "Coltauco", "Doñihue", "Graneros", "Las Cabras",
            "Machalí", "Malloa", "Mostazal", "Olivar", "Peumo", "Pichidegua",
            "Quinta de Tilcoco", "Rengo", "Requínoa", "San Vicente", "Pichilemu", "La Estrella",
            "Litueche", "Marchihue", "Navidad", "Paredones", "San Fernando", "Chépica",
            "Chimbarongo", "Lolol", "Nancagua", "Palmilla", "Peralillo", "Placilla", "Pumanque",
            "Santa Cruz",
        ],
    },
    Region {
        name: "Región del Maule",
        comunas: &[
            "Talca", "Constitución", "Curepto", "Empedrado", "Maule", "Pelarco", "Pencahue",
            "Río Claro", "San Clemente", "San Rafael", "Cauquenes", "Chanco", "Pelluhue",
            "Curicó", "Hualañé", "Licantén", "Molina", "Rauco", "Romeral", "Sagrada Familia",
            "Teno", "Vichuquén", "Linares", "Colbún", "Longaví", "Parral", "Retiro",
            "San Javier", "Villa Alegre", "Yerbas Buenas",
        ],
    },
    Region {
        name: "Región de Ñuble",
        comunas: &[
            "Cobquecura", "Coelemu", "Ninhue", "Portezuelo", "Quirihue", "Ránquil", "Treguaco",
            "Bulnes", "Chillán Viejo", "Chillán", "El Carmen", "Pemuco", "Pinto", "Quillón",
            "San Ignacio", "Yungay", "Coihueco", "Ñiquén", "San Carlos", "San Fabián",
            "San Nicolás",
        ],
    },
    Region {
        name: "Región del Biobío",
        comunas: &[
            "Concepción", "Coronel", "Chiguayante", "Florida", "Hualqui", "Lota", "Penco",
            "San Pedro de la Paz", "Santa Juana", "Talcahuano", "Tomé", "Hualpén", "Lebu",
            "Arauco", "Cañete", "Contulmo", "Curanilahue", "Los Álamos", "Tirúa",
            "Los Ángeles", "Antuco", "Cabrero", "Laja", "Mulchén", "Nacimiento", "Negrete",
            "Quilaco", "Quilleco", "San Rosendo", "Santa Bárbara", "Tucapel", "Yumbel",
            "Alto Biobío",
        ],
    },
    Region {
        name: "Región de la Araucanía",
        comunas: &[
            "Temuco", "Carahue", "Cunco", "Curarrehue", "Freire", "Galvarino", "Gorbea",
            "Lautaro", "Loncoche", "Melipeuco", "Nueva Imperial", "Padre las Casas",
            "Perquenco", "Pitrufquén", "Pucón", "Saavedra", "Teodoro Schmidt", "Toltén",
            "Vilcún", "Villarrica", "Cholchol", "Angol", "Collipulli", "Curacautín", "Ercilla",
            "Lonquimay", "Los Sauces", "Lumaco", "Purén", "Renaico", "Traiguén", "Victoria",
        ],
    },
    Region {
        name: "Región de Los Ríos",
        comunas: &[
            "Valdivia", "Corral", "Lanco", "Los Lagos", "Máfil", "Mariquina", "Paillaco",
            "Panguipulli", "La Unión", "Futrono", "Lago Ranco", "Río Bueno",
        ],
    },
    Region {
        name: "Región de Los Lagos",
        comunas: &[
            "Puerto Montt", "Calbuco", "Cochamó", "Fresia", "Frutillar", "Los Muermos",
            "Llanquihue", "Maullín", "Puerto Varas", "Castro", "Ancud", "Chonchi",
            "Curaco de Vélez", "Dalcahue", "Puqueldón", "Queilén", "Quellón", "Quemchi",
            "Quinchao", "Osorno", "Puerto Octay", "Purranque", "Puyehue", "Río Negro",
            "San Juan de la Costa", "San Pablo", "Chaitén", "Futaleufú", "Hualaihué", "Palena",
        ],
    },
    Region {
        name: "Región Aisén del Gral. Carlos Ibáñez del Campo",
        comunas: &[
            "Coihaique", "Lago Verde", "Aisén", "Cisnes", "Guaitecas", "Cochrane", "O’Higgins",
            "Tortel", "Chile Chico", "Río Ibáñez",
        ],
    },
    Region {
        name: "Región de Magallanes y de la Antártica Chilena",
        comunas: &[
            "Punta Arenas", "Laguna Blanca", "Río Verde", "San Gregorio",
            "Cabo de Hornos (Ex Navarino)", "Antártica", "Porvenir", "Primavera", "Timaukel",
            "Natales", "Torres del Paine",
        ],
    },
    Region {
        name: "Región Metropolitana de Santiago",
        comunas: &[
            "Cerrillos", "Cerro Navia", "Conchalí", "El Bosque", "Estación Central",
            "Huechuraba", "Independencia", "La Cisterna", "La Florida", "La Granja",
            "La Pintana", "La Reina", "Las Condes", "Lo Barnechea", "Lo Espejo", "Lo Prado",
            "Macul", "Maipú", "Ñuñoa", "Pedro Aguirre Cerda", "Peñalolén", "Providencia",
            "Pudahuel", "Quilicura", "Quinta Normal", "Recoleta", "Renca", "San Joaquín",
            "San Miguel", "San Ramón", "Santiago", "Vitacura", "Puente Alto", "Pirque",
            "San José de Maipo", "Colina", "Lampa", "Tiltil", "San Bernardo", "Buin",
            "Calera de Tango", "Paine", "Melipilla", "Alhué", "Curacaví", "María Pinto",
            "San Pedro", "Talagante", "El Monte", "Isla de Maipo", "Padre Hurtado", "Peñaflor",
        ],
    },
];

pub fn regions() -> &'static [Region] {
    REGIONES
}

pub fn find_region(name: &str) -> Option<&'static Region> {
    REGIONES.iter().find(|r| r.name == name)
}

/// Communes of a region; empty for an unknown region
pub fn comunas_of(region: &str) -> &'static [&'static str] {
    find_region(region).map(|r| r.comunas).unwrap_or(&[])
}

pub fn is_comuna_in_region(region: &str, comuna: &str) -> bool {
    find_region(region).is_some_and(|r| r.contains(comuna))
}

/// Case-insensitive substring filter used by the pickers
pub fn filter_names<'a>(names: impl IntoIterator<Item = &'a str>, term: &str) -> Vec<&'a str> {
    let term = term.trim().to_lowercase();
    names
        .into_iter()
        .filter(|n| term.is_empty() || n.to_lowercase().contains(&term))
        .collect()
}
