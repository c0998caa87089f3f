/// One parsed grammar line, borrowing from the source text.
#[derive(Debug, PartialEq)]
pub struct VariantDecl<'input> {
    pub class_name: &'input str,
    pub fields: Vec<FieldDecl<'input>>,
}

#[derive(Debug, PartialEq)]
pub struct FieldDecl<'input> {
    pub type_name: &'input str,
    pub name: &'input str,
}
