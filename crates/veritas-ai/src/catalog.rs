//! Weighted keyword catalog for heuristic categorization.
//!
//! Each category carries four tiers of Portuguese terms observed in Câmara
//! and Senado feeds: primary keywords (strongest single signal), secondary
//! keywords, looser semantic terms, and multi-word context phrases that are
//! near-conclusive on their own (e.g. "marco civil" → Technology).
//!
//! The catalog is a pure lookup table; tests substitute a smaller one via
//! [`PatternCatalog::from_entries`].

use veritas_core::Category;

/// One category's term tiers.
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    pub primary: Vec<String>,
    pub secondary: Vec<String>,
    pub semantic: Vec<String>,
    pub context_phrases: Vec<String>,
}

impl PatternSet {
    pub fn new(
        primary: &[&str],
        secondary: &[&str],
        semantic: &[&str],
        context_phrases: &[&str],
    ) -> Self {
        let own = |terms: &[&str]| terms.iter().map(|s| s.to_string()).collect();
        Self {
            primary: own(primary),
            secondary: own(secondary),
            semantic: own(semantic),
            context_phrases: own(context_phrases),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.primary.is_empty()
            && self.secondary.is_empty()
            && self.semantic.is_empty()
            && self.context_phrases.is_empty()
    }
}

/// Read-only per-category pattern tables, iterated in [`Category::ALL`]
/// declaration order.
pub struct PatternCatalog {
    entries: Vec<(Category, PatternSet)>,
}

impl PatternCatalog {
    /// Build a catalog from explicit entries. Iteration (and therefore
    /// score tie-breaking) follows the order given here.
    pub fn from_entries(entries: Vec<(Category, PatternSet)>) -> Self {
        Self { entries }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, &PatternSet)> {
        self.entries.iter().map(|(c, p)| (*c, p))
    }

    pub fn get(&self, category: Category) -> Option<&PatternSet> {
        self.entries
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, p)| p)
    }

    /// Condensed per-category hint lines for classifier prompts: up to
    /// `per_category` primary keywords and context phrases each, skipping
    /// categories with no patterns.
    pub fn prompt_hints(&self, per_category: usize) -> Vec<String> {
        self.entries
            .iter()
            .filter(|(_, set)| !set.is_empty())
            .map(|(category, set)| {
                let hints = set
                    .primary
                    .iter()
                    .chain(set.context_phrases.iter())
                    .take(per_category)
                    .map(String::as_str)
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{category}: {hints}")
            })
            .collect()
    }
}

impl Default for PatternCatalog {
    /// The production catalog, transcribed from categorization behavior
    /// observed against real Câmara/Senado summaries.
    fn default() -> Self {
        let entries = vec![
            (
                Category::Health,
                PatternSet::new(
                    &["saúde", "saude", "sus", "hospital", "médico", "medico", "medicamento", "vacina"],
                    &["enfermeiro", "tratamento", "doença", "doenca", "paciente", "clínica", "clinica", "ambulatório", "sanitário"],
                    &["cuidado", "prevenção", "cura", "diagnóstico", "terapia", "epidemiologia"],
                    &["política de saúde", "sistema de saúde", "assistência médica", "seguro saúde", "agência nacional de vigilância"],
                ),
            ),
            (
                Category::Education,
                PatternSet::new(
                    &["educação", "educacao", "escola", "ensino", "professor", "aluno", "universidade", "faculdade"],
                    &["estudante", "curso", "aprendizagem", "enem", "vestibular", "creche", "pré-escola"],
                    &["aprendizado", "pedagogia", "didática", "formação", "capacitação", "qualificação"],
                    &["lei de diretrizes", "base nacional curricular", "sistema educacional", "instituição de ensino", "programa educacional"],
                ),
            ),
            (
                Category::Security,
                PatternSet::new(
                    &["segurança", "seguranca", "polícia", "policia", "crime", "criminal", "penal", "código penal"],
                    &["violência", "violencia", "presídio", "presidio", "prisão", "prisao", "delegacia", "investigação"],
                    &["proteção", "cumprimento da lei", "justiça", "delito", "enforcement", "defesa"],
                    &["força de segurança", "sistema penitenciário", "justiça criminal", "agência de segurança", "órgão policial"],
                ),
            ),
            (
                Category::Labor,
                PatternSet::new(
                    &["trabalho", "trabalhista", "emprego", "trabalhador", "salário", "salario", "clt", "sindicato"],
                    &["desemprego", "aposentadoria", "previdência", "previdencia", "inss", "férias", "ferias", "jornada"],
                    &["relação laboral", "direito trabalhista", "remuneração", "benefício", "proteção social"],
                    &["consolidação das leis", "contribuição social", "seguro desemprego", "fundo de garantia", "reforma trabalhista"],
                ),
            ),
            (
                Category::Environment,
                PatternSet::new(
                    &["meio ambiente", "ambiental", "sustentável", "sustentavel", "clima", "climática", "ecológico", "floresta", "descarbonização", "descarbonizacao", "carbono"],
                    &["desmatamento", "poluição", "poluicao", "biodiversidade", "fauna", "flora", "reciclagem", "lixo", "emissão", "emissao", "neutralidade", "gases"],
                    &["conservação", "preservação", "sustentabilidade", "impacto ambiental", "recursos naturais", "efeito estufa", "aquecimento global", "mudança climática"],
                    &["lei ambiental", "agenda ambiental", "proteção ambiental", "gestão ambiental", "licenciamento ambiental", "neutralidade de carbono", "marco legal da descarbonização"],
                ),
            ),
            (
                Category::Technology,
                PatternSet::new(
                    &["tecnologia", "tecnológico", "digital", "internet", "dados", "informação", "software", "aplicativo"],
                    &["computador", "eletrônico", "eletronico", "inteligência artificial", "cyber", "telecomunicação"],
                    &["inovação", "conectividade", "computação", "automatização", "transformação digital"],
                    &["marco civil", "lei de proteção", "lgpd", "agência digital", "infraestrutura tecnológica"],
                ),
            ),
            (
                Category::HumanRights,
                PatternSet::new(
                    &["direitos humanos", "igualdade", "equidade", "discriminação", "discriminacao", "lgbtqi", "lgbt"],
                    &["racismo", "racial", "gênero", "genero", "feminino", "feminismo", "acessibilidade", "deficiente"],
                    &["dignidade", "inclusão", "não discriminação", "proteção de vulneráveis"],
                    &["direito fundamental", "princípio de igualdade", "proteção de minorias", "convenção internacional", "estatuto social"],
                ),
            ),
            (
                Category::Economy,
                PatternSet::new(
                    &["economia", "econômico", "economico", "fiscal", "tributário", "tributario", "imposto", "taxa"],
                    &["orçamento", "orcamento", "financeiro", "monetário", "monetario", "banco", "crédito", "credito", "dívida", "divida"],
                    &["mercado", "comercial", "empresa", "investimento", "crescimento econômico", "política fiscal"],
                    &["política econômica", "lei complementar", "código civil", "direito comercial", "regulação econômica"],
                ),
            ),
            // Catch-all: never matched by scoring.
            (Category::Other, PatternSet::default()),
        ];
        Self::from_entries(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_covers_all_categories_in_order() {
        let catalog = PatternCatalog::default();
        let order: Vec<Category> = catalog.iter().map(|(c, _)| c).collect();
        assert_eq!(order, Category::ALL.to_vec());
    }

    #[test]
    fn other_has_no_patterns() {
        let catalog = PatternCatalog::default();
        assert!(catalog.get(Category::Other).unwrap().is_empty());
    }

    #[test]
    fn prompt_hints_skip_empty_sets_and_cap_terms() {
        let catalog = PatternCatalog::default();
        let hints = catalog.prompt_hints(3);
        assert_eq!(hints.len(), Category::PROMPTABLE.len());
        assert!(hints[0].starts_with("Health: "));
        // Cap of 3: exactly two separators.
        assert_eq!(hints[0].matches(", ").count(), 2);
        assert!(!hints.iter().any(|h| h.starts_with("Other")));
    }

    #[test]
    fn substitutable_catalog_keeps_given_order() {
        let catalog = PatternCatalog::from_entries(vec![
            (Category::Technology, PatternSet::new(&["chip"], &[], &[], &[])),
            (Category::Health, PatternSet::new(&["soro"], &[], &[], &[])),
        ]);
        let order: Vec<Category> = catalog.iter().map(|(c, _)| c).collect();
        assert_eq!(order, vec![Category::Technology, Category::Health]);
        assert!(catalog.get(Category::Economy).is_none());
    }
}
