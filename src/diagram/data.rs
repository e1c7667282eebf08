//! Pre-authored article datasets. Nothing here is computed.

pub struct ScatterTerm {
    pub term: &'static str,
    pub category: &'static str,
    pub x: f64,
    pub y: f64,
    pub similarity: f64,
}

const fn term(
    term: &'static str,
    category: &'static str,
    x: f64,
    y: f64,
    similarity: f64,
) -> ScatterTerm {
    ScatterTerm {
        term,
        category,
        x,
        y,
        similarity,
    }
}

pub const SCATTER_TERMS: &[ScatterTerm] = &[
    term("Diabetes", "diseases", 0.2, 0.3, 0.9),
    term("Insulin", "treatments", 0.25, 0.35, 0.85),
    term("Blood Sugar", "symptoms", 0.22, 0.32, 0.8),
    term("Glucose", "biomarkers", 0.24, 0.34, 0.75),
    term("Pancreas", "organs", 0.18, 0.28, 0.7),
    term("Heart Disease", "diseases", 0.8, 0.7, 0.9),
    term("Cholesterol", "biomarkers", 0.75, 0.65, 0.85),
    term("Blood Pressure", "symptoms", 0.82, 0.72, 0.8),
    term("Cardiovascular", "systems", 0.78, 0.68, 0.75),
    term("Cancer", "diseases", 0.3, 0.8, 0.9),
    term("Tumor", "conditions", 0.35, 0.75, 0.85),
    term("Oncology", "specialties", 0.32, 0.82, 0.8),
    term("Chemotherapy", "treatments", 0.28, 0.78, 0.75),
    term("Asthma", "diseases", 0.7, 0.2, 0.9),
    term("Lungs", "organs", 0.65, 0.25, 0.85),
    term("Breathing", "symptoms", 0.72, 0.18, 0.8),
    term("Car Engine", "mechanical", 0.9, 0.9, 0.1),
    term("Cooking", "lifestyle", 0.1, 0.1, 0.05),
];

pub fn scatter_color(category: &str) -> &'static str {
    match category {
        "diseases" => "#d32f2f",
        "treatments" => "#1976d2",
        "symptoms" => "#f57c00",
        "biomarkers" => "#7b1fa2",
        "organs" => "#388e3c",
        "systems" => "#455a64",
        "conditions" => "#e65100",
        "specialties" => "#6a1b9a",
        "mechanical" => "#757575",
        "lifestyle" => "#616161",
        _ => "#999",
    }
}

pub struct ScatterCluster {
    pub name: &'static str,
    pub center: (f64, f64),
    pub members: &'static [&'static str],
}

pub const SCATTER_CLUSTERS: &[ScatterCluster] = &[
    ScatterCluster {
        name: "Diabetes",
        center: (0.22, 0.32),
        members: &["Diabetes", "Insulin", "Blood Sugar", "Glucose", "Pancreas"],
    },
    ScatterCluster {
        name: "Cardiovascular",
        center: (0.79, 0.69),
        members: &["Heart Disease", "Cholesterol", "Blood Pressure", "Cardiovascular"],
    },
    ScatterCluster {
        name: "Oncology",
        center: (0.31, 0.79),
        members: &["Cancer", "Tumor", "Oncology", "Chemotherapy"],
    },
    ScatterCluster {
        name: "Respiratory",
        center: (0.69, 0.21),
        members: &["Asthma", "Lungs", "Breathing"],
    },
];

pub struct PipelineChunk {
    pub id: &'static str,
    pub text: &'static str,
    pub category: &'static str,
    pub doc_y: f64,
    pub doc_height: f64,
    pub vec_x: f64,
    pub vec_y: f64,
}

pub const PIPELINE_TITLE: &str = "Understanding Diabetes";
pub const PIPELINE_DOC_X: f64 = 50.0;
pub const PIPELINE_DOC_WIDTH: f64 = 300.0;

pub const PIPELINE_CHUNKS: &[PipelineChunk] = &[
    PipelineChunk {
        id: "chunk1",
        text: "Diabetes is a chronic condition that affects how your body processes glucose. When you have diabetes, your pancreas either doesn't produce enough insulin or your cells don't respond properly to insulin.",
        category: "definition",
        doc_y: 80.0,
        doc_height: 100.0,
        vec_x: 0.2,
        vec_y: 0.3,
    },
    PipelineChunk {
        id: "chunk2",
        text: "The most common symptoms of diabetes include increased thirst, frequent urination, and unexplained weight loss. Some people also experience fatigue, blurred vision, and slow-healing wounds.",
        category: "symptoms",
        doc_y: 200.0,
        doc_height: 100.0,
        vec_x: 0.25,
        vec_y: 0.35,
    },
    PipelineChunk {
        id: "chunk3",
        text: "Treatment for diabetes typically involves lifestyle changes such as diet modification and regular exercise. Many patients also require medication like insulin injections or oral medications.",
        category: "treatment",
        doc_y: 320.0,
        doc_height: 100.0,
        vec_x: 0.3,
        vec_y: 0.4,
    },
];

pub const PIPELINE_QUERY: PipelineChunk = PipelineChunk {
    id: "query",
    text: "What are the symptoms of diabetes?",
    category: "query",
    doc_y: 440.0,
    doc_height: 40.0,
    vec_x: 0.24,
    vec_y: 0.34,
};

/// Index into [`PIPELINE_CHUNKS`] of the chunk the query retrieves.
pub const PIPELINE_RETRIEVED: usize = 1;

pub fn pipeline_color(category: &str) -> &'static str {
    match category {
        "definition" => "#d32f2f",
        "symptoms" => "#1976d2",
        "treatment" => "#388e3c",
        "query" => "#ff9800",
        _ => "#999",
    }
}

pub type Properties = &'static [(&'static str, &'static str)];

pub struct KgNode {
    pub id: &'static str,
    pub name: &'static str,
    pub acronym: &'static str,
    pub kind: &'static str,
    pub x: f64,
    pub y: f64,
    pub properties: Properties,
}

pub struct KgLink {
    pub source: &'static str,
    pub target: &'static str,
    pub label: &'static str,
    pub acronym: &'static str,
    pub strength: f64,
    pub properties: Properties,
}

pub const KG_NODES: &[KgNode] = &[
    KgNode {
        id: "diabetes",
        name: "Diabetes",
        acronym: "DM",
        kind: "disease",
        x: 400.0,
        y: 200.0,
        properties: &[
            ("ICD-10", "E11.9"),
            ("Prevalence", "9.3% of US population"),
            ("Type", "Type 2 Diabetes Mellitus"),
            ("Risk Factors", "Obesity, Family History, Age"),
        ],
    },
    KgNode {
        id: "metformin",
        name: "Metformin",
        acronym: "MET",
        kind: "drug",
        x: 200.0,
        y: 150.0,
        properties: &[
            ("Generic Name", "Metformin Hydrochloride"),
            ("Drug Class", "Biguanide"),
            ("FDA Approval", "1994"),
            ("Mechanism", "Reduces hepatic glucose production"),
        ],
    },
    KgNode {
        id: "insulin",
        name: "Insulin",
        acronym: "INS",
        kind: "drug",
        x: 200.0,
        y: 250.0,
        properties: &[
            ("Generic Name", "Human Insulin"),
            ("Drug Class", "Hormone"),
            ("Administration", "Subcutaneous injection"),
            ("Types", "Rapid-acting, Long-acting, Mixed"),
        ],
    },
    KgNode {
        id: "glucose",
        name: "High Glucose",
        acronym: "HG",
        kind: "symptom",
        x: 600.0,
        y: 150.0,
        properties: &[
            ("Normal Range", "70-140 mg/dL"),
            ("Diagnostic", ">200 mg/dL fasting"),
            ("Symptoms", "Frequent urination, Thirst, Fatigue"),
            ("Measurement", "Blood glucose test"),
        ],
    },
    KgNode {
        id: "kidney",
        name: "Kidney Disease",
        acronym: "CKD",
        kind: "disease",
        x: 600.0,
        y: 250.0,
        properties: &[
            ("ICD-10", "N18.9"),
            ("Stages", "1-5 (5 being end-stage)"),
            ("eGFR Threshold", "<60 mL/min/1.73m²"),
            ("Complications", "Anemia, Bone disease, CVD"),
        ],
    },
    KgNode {
        id: "gastro",
        name: "GI Upset",
        acronym: "GI",
        kind: "symptom",
        x: 100.0,
        y: 100.0,
        properties: &[
            ("Common Symptoms", "Nausea, Diarrhea, Abdominal pain"),
            ("Onset", "Usually within 1-2 weeks"),
            ("Management", "Take with food, Gradual titration"),
            ("Frequency", "Up to 30% of patients"),
        ],
    },
    KgNode {
        id: "monitoring",
        name: "Blood Tests",
        acronym: "BT",
        kind: "procedure",
        x: 300.0,
        y: 350.0,
        properties: &[
            ("Test Type", "HbA1c, Fasting glucose"),
            ("Frequency", "Every 3-6 months"),
            ("Target HbA1c", "<7%"),
            ("Cost", "$20-50 per test"),
        ],
    },
    KgNode {
        id: "lifestyle",
        name: "Lifestyle Changes",
        acronym: "LC",
        kind: "treatment",
        x: 500.0,
        y: 350.0,
        properties: &[
            ("Components", "Diet, Exercise, Weight loss"),
            ("Efficacy", "Can reduce HbA1c by 1-2%"),
            ("Recommendations", "150 min/week exercise"),
            ("Diet", "Low-carb, Mediterranean"),
        ],
    },
];

pub const KG_LINKS: &[KgLink] = &[
    KgLink {
        source: "metformin",
        target: "diabetes",
        label: "treats",
        acronym: "TRT",
        strength: 0.9,
        properties: &[
            ("Evidence Level", "A (Strong)"),
            ("Dosage", "500-2550 mg daily"),
            ("Efficacy", "Reduces HbA1c by 1-2%"),
            ("First Line", "Yes, recommended first-line therapy"),
        ],
    },
    KgLink {
        source: "insulin",
        target: "diabetes",
        label: "treats",
        acronym: "TRT",
        strength: 0.9,
        properties: &[
            ("Evidence Level", "A (Strong)"),
            ("Indication", "When oral agents insufficient"),
            ("Dosage", "Variable based on blood glucose"),
            ("Administration", "Subcutaneous injection"),
        ],
    },
    KgLink {
        source: "diabetes",
        target: "glucose",
        label: "causes",
        acronym: "CAU",
        strength: 0.8,
        properties: &[
            ("Mechanism", "Insulin resistance and deficiency"),
            ("Time Course", "Chronic, progressive"),
            ("Reversibility", "Partial with treatment"),
            ("Monitoring", "Regular blood glucose checks"),
        ],
    },
    KgLink {
        source: "metformin",
        target: "gastro",
        label: "side effect",
        acronym: "SE",
        strength: 0.7,
        properties: &[
            ("Frequency", "Up to 30% of patients"),
            ("Onset", "Usually within 1-2 weeks"),
            ("Severity", "Mild to moderate"),
            ("Management", "Take with food, gradual titration"),
        ],
    },
    KgLink {
        source: "metformin",
        target: "kidney",
        label: "contraindicated in",
        acronym: "CI",
        strength: 0.6,
        properties: &[
            ("Threshold", "eGFR <30 mL/min/1.73m²"),
            ("Risk", "Lactic acidosis"),
            ("Alternative", "Insulin or other agents"),
            ("Monitoring", "Regular kidney function tests"),
        ],
    },
    KgLink {
        source: "diabetes",
        target: "kidney",
        label: "complicates",
        acronym: "CMP",
        strength: 0.8,
        properties: &[
            ("Mechanism", "Hyperglycemia damages kidney vessels"),
            ("Prevalence", "20-40% of diabetic patients"),
            ("Prevention", "Good glycemic control"),
            ("Screening", "Annual urine albumin test"),
        ],
    },
    KgLink {
        source: "diabetes",
        target: "monitoring",
        label: "requires",
        acronym: "REQ",
        strength: 0.9,
        properties: &[
            ("Frequency", "Every 3-6 months"),
            ("Tests", "HbA1c, Fasting glucose, Kidney function"),
            ("Targets", "HbA1c <7%, BP <140/90"),
            ("Cost", "$200-500 annually"),
        ],
    },
    KgLink {
        source: "lifestyle",
        target: "diabetes",
        label: "manages",
        acronym: "MNG",
        strength: 0.7,
        properties: &[
            ("Efficacy", "Can reduce HbA1c by 1-2%"),
            ("Components", "Diet, Exercise, Weight loss"),
            ("Sustainability", "Long-term lifestyle changes"),
            ("Support", "Diabetes education programs"),
        ],
    },
    KgLink {
        source: "monitoring",
        target: "glucose",
        label: "measures",
        acronym: "MSR",
        strength: 0.8,
        properties: &[
            ("Test Type", "Blood glucose, HbA1c"),
            ("Accuracy", "Laboratory standard"),
            ("Frequency", "As needed for control"),
            ("Interpretation", "Compare to target ranges"),
        ],
    },
];

pub fn kg_node_color(kind: &str) -> &'static str {
    match kind {
        "disease" => "#d32f2f",
        "drug" => "#1976d2",
        "symptom" => "#f57c00",
        "procedure" => "#7b1fa2",
        "treatment" => "#388e3c",
        _ => "#999",
    }
}

pub fn kg_relation_color(label: &str) -> &'static str {
    match label {
        "treats" | "manages" => "#388e3c",
        "causes" | "contraindicated in" | "complicates" => "#d32f2f",
        "side effect" => "#f57c00",
        "requires" => "#1976d2",
        "measures" => "#7b1fa2",
        _ => "#666",
    }
}

pub struct EntityNode {
    pub id: &'static str,
    pub label: &'static str,
    pub acronym: &'static str,
    pub kind: &'static str,
    pub chunk: &'static str,
    pub context: &'static str,
    pub at: (f64, f64),
}

pub struct EntityLink {
    pub source: &'static str,
    pub target: &'static str,
    pub label: &'static str,
}

pub const ENTITY_NODES: &[EntityNode] = &[
    EntityNode {
        id: "covid19",
        label: "Covid-19",
        acronym: "CoV",
        kind: "disease",
        chunk: "A",
        context: "Covid-19 is a respiratory disease that can cause severe illness in some patients.",
        at: (120.0, 120.0),
    },
    EntityNode {
        id: "remdesivir",
        label: "Remdesivir",
        acronym: "Rem",
        kind: "drug",
        chunk: "A",
        context: "Remdesivir is an antiviral drug used to treat Covid-19 and has shown some effectiveness.",
        at: (240.0, 80.0),
    },
    EntityNode {
        id: "respiratory",
        label: "Respiratory diseases",
        acronym: "Res",
        kind: "disease",
        chunk: "A",
        context: "Respiratory diseases like Covid-19 may require antiviral and anti-inflammatory treatments.",
        at: (240.0, 180.0),
    },
    EntityNode {
        id: "glucocorticoids",
        label: "Glucocorticoids",
        acronym: "Glu",
        kind: "hormone",
        chunk: "B",
        context: "Glucocorticoids are hormones that help reduce inflammation in the body.",
        at: (120.0, 300.0),
    },
    EntityNode {
        id: "dexamethasone",
        label: "Dexamethasone",
        acronym: "Dex",
        kind: "drug",
        chunk: "B",
        context: "Dexamethasone is a pharmacologic substance classified as a glucocorticoid.",
        at: (240.0, 320.0),
    },
];

pub const ENTITY_LINKS: &[EntityLink] = &[
    EntityLink {
        source: "remdesivir",
        target: "covid19",
        label: "treats",
    },
    EntityLink {
        source: "covid19",
        target: "respiratory",
        label: "is a",
    },
    EntityLink {
        source: "dexamethasone",
        target: "glucocorticoids",
        label: "is a",
    },
];

pub fn entity_color(kind: &str) -> &'static str {
    match kind {
        "disease" => "#1976d2",
        "drug" => "#d32f2f",
        "hormone" => "#7b1fa2",
        _ => "#aaa",
    }
}

pub struct Tag {
    pub kind: &'static str,
    pub value: &'static str,
    pub description: &'static str,
}

const fn tag(kind: &'static str, value: &'static str, description: &'static str) -> Tag {
    Tag {
        kind,
        value,
        description,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagLevel {
    Chunk,
    Level1,
    Level2,
}

pub struct TagNode {
    pub id: &'static str,
    pub name: &'static str,
    pub color: &'static str,
    pub level: TagLevel,
    pub children: &'static [&'static str],
    pub tags: &'static [Tag],
}

/// Chunks first, then level-1 meta tags, then the level-2 root.
pub const TAG_NODES: &[TagNode] = &[
    TagNode {
        id: "chunkA",
        name: "Infectious Disease & Treatment",
        color: "#ff6b6b",
        level: TagLevel::Chunk,
        children: &[],
        tags: &[
            tag("DISEASE", "Covid-19", "Respiratory disease causing severe illness"),
            tag("MEDICATION", "Remdesivir", "Antiviral drug for Covid-19 treatment"),
            tag("SYMPTOM", "Respiratory distress", "Difficulty breathing and lung complications"),
            tag("TREATMENT_TYPE", "Antiviral therapy", "Medication targeting viral replication"),
            tag("BODY_SYSTEM", "Respiratory system", "Lungs and breathing apparatus"),
        ],
    },
    TagNode {
        id: "chunkB",
        name: "Hormones & Pharmacology",
        color: "#4ecdc4",
        level: TagLevel::Chunk,
        children: &[],
        tags: &[
            tag("MEDICATION_CLASS", "Glucocorticoids", "Hormones that reduce inflammation"),
            tag("MEDICATION", "Dexamethasone", "Specific glucocorticoid medication"),
            tag("BODY_FUNCTION", "Inflammation regulation", "Control of inflammatory responses"),
            tag("PHARMACOLOGY", "Anti-inflammatory", "Medication mechanism of action"),
            tag("HORMONE_TYPE", "Steroid hormones", "Class of hormone medications"),
        ],
    },
    TagNode {
        id: "meta1",
        name: "Infectious Disease Management",
        color: "#ff6b6b",
        level: TagLevel::Level1,
        children: &["chunkA"],
        tags: &[
            tag("DISEASE_CATEGORY", "Infectious diseases", "Diseases caused by pathogens"),
            tag("TREATMENT_APPROACH", "Antiviral therapy", "Targeted treatment for viral infections"),
            tag("CLINICAL_FOCUS", "Respiratory medicine", "Specialized care for breathing disorders"),
        ],
    },
    TagNode {
        id: "meta2",
        name: "Endocrinology & Pharmacology",
        color: "#4ecdc4",
        level: TagLevel::Level1,
        children: &["chunkB"],
        tags: &[
            tag("MEDICAL_SPECIALTY", "Endocrinology", "Study of hormones and metabolism"),
            tag("DRUG_CLASS", "Steroid medications", "Hormone-based pharmaceutical agents"),
            tag("THERAPEUTIC_GOAL", "Inflammation control", "Managing inflammatory responses"),
        ],
    },
    TagNode {
        id: "meta3",
        name: "Medical Therapeutics",
        color: "#45b7d1",
        level: TagLevel::Level2,
        children: &["meta1", "meta2"],
        tags: &[
            tag("MEDICAL_DOMAIN", "Clinical therapeutics", "Application of medical treatments"),
            tag("PATIENT_CARE", "Disease management", "Comprehensive treatment approaches"),
            tag("HEALTHCARE_FOCUS", "Treatment optimization", "Improving patient outcomes"),
        ],
    },
];

pub struct SearchStep {
    pub level: TagLevel,
    pub node: &'static str,
    pub reason: &'static str,
}

pub const QA_QUESTION: &str = "What are the treatment options for Covid-19?";

pub const QA_SEARCH_PATH: &[SearchStep] = &[
    SearchStep {
        level: TagLevel::Level2,
        node: "meta3",
        reason: "Medical Therapeutics covers treatment approaches",
    },
    SearchStep {
        level: TagLevel::Level1,
        node: "meta1",
        reason: "Infectious Disease Management includes Covid-19 treatments",
    },
    SearchStep {
        level: TagLevel::Chunk,
        node: "chunkA",
        reason: "Infectious Disease & Treatment chunk contains Covid-19 treatment info",
    },
];

pub const QA_FOUND: &str = "Found relevant chunk: Infectious Disease & Treatment";
pub const QA_FOUND_DETAIL: &str = "Contains: Remdesivir, Antiviral therapy";

pub struct Refinement {
    pub level: TagLevel,
    pub answer: &'static str,
    pub meta_tags: &'static [&'static str],
}

/// Answer refinement, from the matched chunk up to the root.
pub const QA_REFINEMENT: &[Refinement] = &[
    Refinement {
        level: TagLevel::Chunk,
        answer: "Treatment options for Covid-19 include Remdesivir (antiviral drug) and respiratory disease management approaches.",
        meta_tags: &[],
    },
    Refinement {
        level: TagLevel::Level1,
        answer: "Infectious disease management approaches include antiviral therapy and respiratory medicine treatments.",
        meta_tags: &["DISEASE_CATEGORY", "TREATMENT_APPROACH", "CLINICAL_FOCUS"],
    },
    Refinement {
        level: TagLevel::Level2,
        answer: "Clinical therapeutics for disease management involve treatment optimization and patient care approaches.",
        meta_tags: &["MEDICAL_DOMAIN", "PATIENT_CARE", "HEALTHCARE_FOCUS"],
    },
];

pub struct OverviewNode {
    pub id: &'static str,
    pub label: &'static str,
    pub kind: &'static str,
    pub context: &'static str,
}

const fn onode(
    id: &'static str,
    label: &'static str,
    kind: &'static str,
    context: &'static str,
) -> OverviewNode {
    OverviewNode {
        id,
        label,
        kind,
        context,
    }
}

pub struct Subgraph {
    pub id: &'static str,
    pub nodes: &'static [OverviewNode],
    pub links: &'static [(&'static str, &'static str, &'static str)],
}

pub enum LayerContent {
    /// Small subgraphs laid out on rings.
    Rings(&'static [Subgraph]),
    /// Standalone entries laid out on a row.
    Row(&'static [OverviewNode]),
}

pub struct Layer {
    pub id: &'static str,
    pub label: &'static str,
    pub color: &'static str,
    pub y: f64,
    pub content: LayerContent,
}

pub const LAYERS: &[Layer] = &[
    Layer {
        id: "ehr",
        label: "EHR Data",
        color: "#ff7043",
        y: 120.0,
        content: LayerContent::Rings(&[
            Subgraph {
                id: "Patient-001",
                nodes: &[
                    onode("p1", "Patient-001", "patient", "Age 58, F"),
                    onode("p1-diabetes", "Type 2 Diabetes", "diagnosis", ""),
                    onode("p1-hypertension", "Hypertension", "diagnosis", ""),
                    onode("p1-metformin", "Metformin", "medication", ""),
                    onode("p1-lisinopril", "Lisinopril", "medication", ""),
                    onode("p1-hba1c", "HbA1c: 8.2%", "lab", ""),
                    onode("p1-creatinine", "Creatinine: 1.1", "lab", ""),
                    onode("p1-admission", "Admission 2024-05-01", "encounter", "2024-05-01"),
                ],
                links: &[
                    ("p1", "p1-diabetes", "has diagnosis"),
                    ("p1", "p1-hypertension", "has diagnosis"),
                    ("p1", "p1-metformin", "prescribed"),
                    ("p1", "p1-lisinopril", "prescribed"),
                    ("p1", "p1-hba1c", "lab result"),
                    ("p1", "p1-creatinine", "lab result"),
                    ("p1", "p1-admission", "had encounter"),
                ],
            },
            Subgraph {
                id: "Patient-002",
                nodes: &[
                    onode("p2", "Patient-002", "patient", "Age 67, M"),
                    onode("p2-chf", "Congestive Heart Failure", "diagnosis", ""),
                    onode("p2-afib", "Atrial Fibrillation", "diagnosis", ""),
                    onode("p2-warfarin", "Warfarin", "medication", ""),
                    onode("p2-furosemide", "Furosemide", "medication", ""),
                    onode("p2-inr", "INR: 2.5", "lab", ""),
                    onode("p2-bnp", "BNP: 350", "lab", ""),
                    onode("p2-followup", "Follow-up 2024-06-10", "encounter", "2024-06-10"),
                ],
                links: &[
                    ("p2", "p2-chf", "has diagnosis"),
                    ("p2", "p2-afib", "has diagnosis"),
                    ("p2", "p2-warfarin", "prescribed"),
                    ("p2", "p2-furosemide", "prescribed"),
                    ("p2", "p2-inr", "lab result"),
                    ("p2", "p2-bnp", "lab result"),
                    ("p2", "p2-followup", "had encounter"),
                ],
            },
            Subgraph {
                id: "Patient-003",
                nodes: &[
                    onode("p3", "Patient-003", "patient", "Age 45, F"),
                    onode("p3-asthma", "Asthma", "diagnosis", ""),
                    onode("p3-obesity", "Obesity", "diagnosis", ""),
                    onode("p3-albuterol", "Albuterol", "medication", ""),
                    onode("p3-fluticasone", "Fluticasone", "medication", ""),
                    onode("p3-fev1", "FEV1: 1.8L", "lab", ""),
                    onode("p3-bmi", "BMI: 34", "lab", ""),
                    onode("p3-er", "ER Visit 2024-04-15", "encounter", "2024-04-15"),
                ],
                links: &[
                    ("p3", "p3-asthma", "has diagnosis"),
                    ("p3", "p3-obesity", "has diagnosis"),
                    ("p3", "p3-albuterol", "prescribed"),
                    ("p3", "p3-fluticasone", "prescribed"),
                    ("p3", "p3-fev1", "lab result"),
                    ("p3", "p3-bmi", "lab result"),
                    ("p3", "p3-er", "had encounter"),
                ],
            },
        ]),
    },
    Layer {
        id: "papers",
        label: "Med Books & Papers",
        color: "#42a5f5",
        y: 300.0,
        content: LayerContent::Rings(&[
            Subgraph {
                id: "Paper-001",
                nodes: &[
                    onode(
                        "paper1",
                        "Metformin for Type 2 Diabetes",
                        "paper",
                        "A randomized controlled trial evaluating the efficacy of metformin in glycemic control for adults with type 2 diabetes.",
                    ),
                    onode("paper1-diabetes", "Type 2 Diabetes", "topic", "Primary disease focus of the study."),
                    onode("paper1-metformin", "Metformin", "intervention", "Drug intervention studied."),
                    onode("paper1-hba1c", "HbA1c", "outcome", "Primary outcome measure: change in HbA1c."),
                ],
                links: &[
                    ("paper1", "paper1-diabetes", "studies"),
                    ("paper1", "paper1-metformin", "intervention"),
                    ("paper1", "paper1-hba1c", "measures"),
                ],
            },
            Subgraph {
                id: "Paper-002",
                nodes: &[
                    onode(
                        "paper2",
                        "Heart Failure Management Guidelines",
                        "guideline",
                        "2022 clinical practice guideline for the diagnosis and management of heart failure.",
                    ),
                    onode("paper2-chf", "Congestive Heart Failure", "topic", "Main disease addressed."),
                    onode("paper2-bnp", "BNP", "biomarker", "BNP as a diagnostic and prognostic biomarker."),
                    onode("paper2-furosemide", "Furosemide", "treatment", "Loop diuretic recommended for symptom relief."),
                ],
                links: &[
                    ("paper2", "paper2-chf", "addresses"),
                    ("paper2", "paper2-bnp", "discusses"),
                    ("paper2", "paper2-furosemide", "recommends"),
                ],
            },
            Subgraph {
                id: "Paper-003",
                nodes: &[
                    onode(
                        "paper3",
                        "Asthma and Obesity: A Review",
                        "review",
                        "A systematic review of the relationship between obesity and asthma severity in adults.",
                    ),
                    onode("paper3-asthma", "Asthma", "topic", "Primary disease focus."),
                    onode("paper3-obesity", "Obesity", "risk factor", "Risk factor for increased asthma severity."),
                    onode("paper3-fev1", "FEV1", "outcome", "Lung function outcome."),
                ],
                links: &[
                    ("paper3", "paper3-asthma", "reviews"),
                    ("paper3", "paper3-obesity", "analyzes"),
                    ("paper3", "paper3-fev1", "measures"),
                ],
            },
        ]),
    },
    Layer {
        id: "dict",
        label: "Med Vocabularies",
        color: "#66bb6a",
        y: 480.0,
        content: LayerContent::Row(&[
            onode(
                "umls-metformin",
                "Metformin",
                "drug",
                "A biguanide oral antihyperglycemic agent used for the management of type 2 diabetes mellitus.",
            ),
            onode(
                "umls-bnp",
                "BNP",
                "biomarker",
                "B-type natriuretic peptide, a cardiac neurohormone used as a biomarker for heart failure.",
            ),
            onode(
                "umls-fev1",
                "FEV1",
                "measurement",
                "Forced expiratory volume in 1 second, a measure of lung function.",
            ),
            onode(
                "umls-furosemide",
                "Furosemide",
                "drug",
                "A loop diuretic used to treat fluid build-up due to heart failure, liver scarring, or kidney disease.",
            ),
            onode(
                "umls-hba1c",
                "HbA1c",
                "lab",
                "Glycated hemoglobin, a measure of average blood glucose over the past 2-3 months.",
            ),
            onode(
                "umls-asthma",
                "Asthma",
                "disease",
                "A chronic inflammatory disease of the airways characterized by variable and recurring symptoms.",
            ),
            onode(
                "umls-obesity",
                "Obesity",
                "disease",
                "A condition characterized by excessive body fat that increases the risk of health problems.",
            ),
        ]),
    },
];

/// Edges between layers: EHR to papers, then papers to vocabulary.
pub const CROSS_EDGES: &[(&str, &str)] = &[
    ("p1-diabetes", "paper1-diabetes"),
    ("p1-metformin", "paper1-metformin"),
    ("p1-hba1c", "paper1-hba1c"),
    ("p2-chf", "paper2-chf"),
    ("p2-bnp", "paper2-bnp"),
    ("p2-furosemide", "paper2-furosemide"),
    ("p3-asthma", "paper3-asthma"),
    ("p3-obesity", "paper3-obesity"),
    ("p3-fev1", "paper3-fev1"),
    ("paper1-metformin", "umls-metformin"),
    ("paper1-hba1c", "umls-hba1c"),
    ("paper2-bnp", "umls-bnp"),
    ("paper2-furosemide", "umls-furosemide"),
    ("paper3-fev1", "umls-fev1"),
    ("paper3-asthma", "umls-asthma"),
    ("paper3-obesity", "umls-obesity"),
];

/// Short node label: the first four letters of a single word, else word initials.
pub fn acronym(label: &str) -> String {
    let words: Vec<&str> = label.split_whitespace().collect();
    if words.len() == 1 {
        return label.chars().take(4).collect::<String>().to_uppercase();
    }
    words
        .iter()
        .filter_map(|w| w.chars().next())
        .collect::<String>()
        .to_uppercase()
        .chars()
        .take(4)
        .collect()
}

/// Greedy word wrap using a fixed glyph width estimate.
pub fn wrap_text(text: &str, width: f64, glyph_width: f64) -> Vec<String> {
    let mut lines = Vec::new();
    let mut words = text.split(' ');
    let Some(first) = words.next() else {
        return lines;
    };
    let mut current = first.to_string();
    for word in words {
        let candidate_len = current.chars().count() + 1 + word.chars().count();
        if candidate_len as f64 * glyph_width > width - 20.0 {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        } else {
            current.push(' ');
            current.push_str(word);
        }
    }
    lines.push(current);
    lines
}

#[cfg(test)]
#[path = "../../tests/unit/diagram/data.rs"]
mod tests;
