use fxhash::FxHashSet as HashSet;

///
/// The allele tokens of one trait, in declaration order and without duplicates.
///
/// Tokens may be longer than one character (`"Rh+"`, `"IA"`). Construction trims each
/// token and drops blank ones.
///
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlleleAlphabet {
    tokens: Vec<String>,
}

impl AlleleAlphabet {
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::default();
        let tokens = tokens
            .into_iter()
            .map(|t| t.as_ref().trim().to_string())
            .filter(|t| !t.is_empty())
            .filter(|t| seen.insert(t.clone()))
            .collect();

        AlleleAlphabet { tokens }
    }

    ///
    /// The single-character alphabet implied by a set of genotype strings: every
    /// character of every genotype, in order of first appearance.
    ///
    pub fn from_genotypes<I, S>(genotypes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::default();
        let mut tokens = Vec::new();
        for genotype in genotypes {
            for ch in genotype.as_ref().chars() {
                if seen.insert(ch) {
                    tokens.push(ch.to_string());
                }
            }
        }
        AlleleAlphabet { tokens }
    }

    pub fn contains(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Tokens sorted by code point, the order used for derived allele lists.
    pub fn sorted(&self) -> Vec<String> {
        let mut tokens = self.tokens.clone();
        tokens.sort();
        tokens
    }
}

impl<S: AsRef<str>> FromIterator<S> for AlleleAlphabet {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        AlleleAlphabet::new(iter)
    }
}
