//! Member Emitter
//!
//! `ClassPrinter` walks a fully lowered `ClassDecl` and renders it with the
//! profile's syntax rules. It never sees a property: by the time a class
//! reaches the printer every property is a backing field plus accessors.
//!
//! Type names are translated while printing; a miss fails the whole class
//! with `UnknownType` and no text is produced. `emit_file` wraps the class
//! in the profile's preamble: header lines, container, then imports.

mod preamble;
mod source_writer;
pub mod type_names;

pub use source_writer::SourceWriter;
pub use type_names::TypeMapper;

use crate::profile::{
    AccessLevel, AccessStyle, BlockStyle, ConstructorName, ContainerStyle, DeclarationStyle,
    HeritageStyle, MutabilityStyle, OverrideMarker, SpecialForm, StaticInitializer, StaticStyle,
    SyntaxRules, TargetProfile,
};
use crate::transforms::ir::{
    ClassDecl, ClassMember, ConstructorDecl, FieldDecl, MethodBody, MethodDecl, Origin,
};
use classport_common::ConvertError;
use classport_ir::{Mutability, Parameter};

pub struct ClassPrinter<'a> {
    profile: &'a TargetProfile,
    types: TypeMapper<'a>,
    writer: SourceWriter,
    class_name: String,
}

impl<'a> ClassPrinter<'a> {
    pub fn new(profile: &'a TargetProfile, types: TypeMapper<'a>) -> Self {
        Self {
            profile,
            types,
            writer: SourceWriter::new(&profile.syntax.indent),
            class_name: String::new(),
        }
    }

    const fn syntax(&self) -> &'a SyntaxRules {
        &self.profile.syntax
    }

    /// Render a whole class. The text always ends with a newline.
    pub fn emit_class(mut self, class: &ClassDecl) -> Result<String, ConvertError> {
        self.render_class(class)?;
        Ok(self.writer.finish())
    }

    /// Render a complete source file: header, container statement, feature
    /// imports, declared imports, then the class (inside the container block
    /// for targets that nest it). Groups are separated by a blank line.
    pub fn emit_file(mut self, class: &ClassDecl) -> Result<String, ConvertError> {
        self.render_class(class)?;
        let syntax = self.syntax();
        let class_text = std::mem::replace(&mut self.writer, SourceWriter::new(&syntax.indent))
            .finish();
        let rules = &syntax.preamble;
        let container = class.scope.container.as_deref().map(str::trim);

        let mut groups = vec![rules.header.clone()];
        if let (Some(path), ContainerStyle::Statement { format, separator }) =
            (container, &rules.container)
        {
            groups.push(vec![format.replace("{}", &path.replace('.', separator))]);
        }
        groups.push(preamble::feature_imports(rules, &class_text));
        groups.push(preamble::declared_imports(rules, &class.scope.imports));

        for group in groups.iter().filter(|group| !group.is_empty()) {
            for line in group {
                self.writer.line(line);
            }
            self.writer.write_line();
        }

        match (container, &rules.container) {
            (Some(path), ContainerStyle::Block { format, separator }) => {
                let opening = format.replace("{}", &path.replace('.', separator));
                match &syntax.blocks {
                    BlockStyle::Braces => {
                        self.writer.line(&opening);
                        self.writer.line("{");
                        self.write_text(&class_text);
                        self.writer.line("}");
                    }
                    BlockStyle::Indented { .. } => {
                        self.writer.write(&opening);
                        self.writer.line(":");
                        self.writer.increase_indent();
                        self.write_text(&class_text);
                        self.writer.decrease_indent();
                    }
                }
            }
            _ => self.write_text(&class_text),
        }
        Ok(self.writer.finish())
    }

    fn write_text(&mut self, text: &str) {
        for line in text.lines() {
            self.writer.line(line);
        }
    }

    fn render_class(&mut self, class: &ClassDecl) -> Result<(), ConvertError> {
        self.class_name.clone_from(&class.name);
        self.emit_header(class);

        let syntax = self.syntax();
        let sections = syntax.access == AccessStyle::Sections;
        self.writer.increase_indent();

        let mut current_section: Option<AccessLevel> = None;
        let mut previous: Option<&ClassMember> = None;
        for member in &class.members {
            let access = member.access();
            if sections && current_section != Some(access) {
                if previous.is_some() {
                    self.writer.write_line();
                }
                self.writer.decrease_indent();
                if let Some(label) = access.keyword() {
                    self.writer.line(&format!("{label}:"));
                }
                self.writer.increase_indent();
                current_section = Some(access);
            } else if let Some(prev) = previous
                && !(prev.is_field() && member.is_field())
            {
                self.writer.write_line();
            }
            self.emit_member(member)?;
            previous = Some(member);
        }

        if class.members.is_empty()
            && let BlockStyle::Indented { empty_body } = &syntax.blocks
        {
            self.writer.line(empty_body);
        }

        self.writer.decrease_indent();
        if syntax.blocks == BlockStyle::Braces {
            self.writer.write("}");
            self.writer.write(&syntax.class_terminator);
            self.writer.write_line();
        }
        Ok(())
    }

    fn emit_header(&mut self, class: &ClassDecl) {
        let syntax = self.syntax();
        let form = class
            .special
            .and_then(|special| syntax.special.classes.get(&special));
        for decorator in &syntax.class_decorators {
            self.writer.line(decorator);
        }
        self.write_decorator(form);
        if syntax.access == AccessStyle::Keyword
            && let Some(keyword) = class.access.keyword()
        {
            self.writer.write(keyword);
            self.writer.write(" ");
        }
        self.write_prefix(form);
        self.writer.write("class ");
        self.writer.write(&class.name);
        self.write_suffix(form);
        self.emit_heritage(class);
        match &syntax.blocks {
            BlockStyle::Braces => {
                self.writer.write_line();
                self.writer.line("{");
            }
            BlockStyle::Indented { .. } => self.writer.line(":"),
        }
    }

    fn emit_heritage(&mut self, class: &ClassDecl) {
        let parents: Vec<&str> = class
            .extends
            .iter()
            .chain(class.implements.iter())
            .map(String::as_str)
            .collect();
        match &self.syntax().heritage {
            HeritageStyle::Keywords {
                extends,
                implements,
            } => {
                if let Some(base) = &class.extends {
                    self.writer.write(&format!(" {extends} {base}"));
                }
                if !class.implements.is_empty() {
                    self.writer
                        .write(&format!(" {implements} {}", class.implements.join(", ")));
                }
            }
            HeritageStyle::BaseList { access } => {
                if parents.is_empty() {
                    return;
                }
                let entries: Vec<String> = parents
                    .iter()
                    .map(|parent| match access {
                        Some(access) => format!("{access} {parent}"),
                        None => (*parent).to_string(),
                    })
                    .collect();
                self.writer.write(&format!(" : {}", entries.join(", ")));
            }
            HeritageStyle::Parenthesized => {
                if !parents.is_empty() {
                    self.writer.write(&format!("({})", parents.join(", ")));
                }
            }
        }
    }

    /// Render one member at the current indentation.
    pub fn emit_member(&mut self, member: &ClassMember) -> Result<(), ConvertError> {
        match member {
            ClassMember::Field(field) => self.emit_field(field),
            ClassMember::Method(method) => self.emit_method(method),
            ClassMember::Constructor(ctor) => self.emit_constructor(ctor),
        }
    }

    fn translate(&self, ty: &str, origin: &Origin, own: &str) -> Result<String, ConvertError> {
        self.types.translate(ty).ok_or_else(|| {
            ConvertError::unknown_type(&self.class_name, Some(origin.report_name(own)), ty)
        })
    }

    fn write_decorator(&mut self, form: Option<&SpecialForm>) {
        if let Some(decorator) = form.and_then(|form| form.decorator.as_deref()) {
            self.writer.line(decorator);
        }
    }

    fn write_prefix(&mut self, form: Option<&SpecialForm>) {
        if let Some(prefix) = form.and_then(|form| form.prefix.as_deref()) {
            self.writer.write(prefix);
            self.writer.write(" ");
        }
    }

    fn write_suffix(&mut self, form: Option<&SpecialForm>) {
        if let Some(suffix) = form.and_then(|form| form.suffix.as_deref()) {
            self.writer.write(" ");
            self.writer.write(suffix);
        }
    }

    fn write_access(&mut self, access: AccessLevel) {
        if self.syntax().access == AccessStyle::Keyword
            && let Some(keyword) = access.keyword()
        {
            self.writer.write(keyword);
            self.writer.write(" ");
        }
    }

    fn emit_field(&mut self, field: &FieldDecl) -> Result<(), ConvertError> {
        let syntax = self.syntax();
        let mut ty = self.translate(&field.ty, &field.origin, &field.name)?;

        self.write_access(field.access);
        let mut static_written = false;
        match &syntax.mutability {
            MutabilityStyle::Keyword {
                read_only,
                constant,
            } => match field.mutability {
                Mutability::Mutable => {}
                Mutability::ReadOnly => {
                    if field.is_static {
                        static_written = self.write_static_keyword(true);
                    }
                    self.writer.write(read_only);
                    self.writer.write(" ");
                }
                Mutability::Const => {
                    self.writer.write(constant);
                    self.writer.write(" ");
                    static_written = true;
                }
            },
            MutabilityStyle::Annotation { wrapper } => {
                if field.mutability != Mutability::Mutable {
                    ty = wrapper.replace("{}", &ty);
                    static_written = true;
                }
            }
        }
        if field.is_static && !static_written {
            match &syntax.statics {
                StaticStyle::Keyword { .. } => {
                    self.write_static_keyword(true);
                }
                StaticStyle::Decorated { field_wrapper, .. } => {
                    ty = field_wrapper.replace("{}", &ty);
                }
            }
        }

        match syntax.declarations {
            DeclarationStyle::TypeFirst => self.writer.write(&format!("{ty} {}", field.name)),
            DeclarationStyle::Annotated => self.writer.write(&format!("{}: {ty}", field.name)),
        }
        if let Some(default) = &field.default {
            self.writer.write(" = ");
            self.writer.write(default);
        }
        self.writer.write(&syntax.statement_terminator);
        self.writer.write_line();
        Ok(())
    }

    /// Writes the static keyword when statics are keyword-marked. Returns
    /// whether it did.
    fn write_static_keyword(&mut self, for_field: bool) -> bool {
        match &self.syntax().statics {
            StaticStyle::Keyword { method, field } => {
                self.writer.write(if for_field { field } else { method });
                self.writer.write(" ");
                true
            }
            StaticStyle::Decorated { .. } => false,
        }
    }

    /// Pass-by-reference spelling for a translated type, if the target has one.
    fn by_reference(&self, ty: String) -> String {
        match &self.syntax().by_reference {
            Some(rule) => rule.apply(&ty),
            None => ty,
        }
    }

    fn emit_method(&mut self, method: &MethodDecl) -> Result<(), ConvertError> {
        let syntax = self.syntax();
        let own = method.signature.name.as_str();
        let mut return_type = self.translate(&method.return_type, &method.origin, own)?;
        if matches!(method.body, MethodBody::ReadField { .. }) {
            return_type = self.by_reference(return_type);
        }
        let params = self.render_params(&method.params, !method.is_static, &method.origin, own)?;
        let form = method
            .special
            .and_then(|special| syntax.special.methods.get(&special));

        if method.overrides.is_some()
            && let OverrideMarker::Annotation(annotation) = &syntax.override_marker
        {
            self.writer.line(annotation);
        }
        if method.is_static
            && let StaticStyle::Decorated {
                method_decorator, ..
            } = &syntax.statics
        {
            self.writer.line(method_decorator);
        }
        self.write_decorator(form);

        self.write_access(method.access);
        if method.is_static {
            self.write_static_keyword(false);
        }
        self.write_prefix(form);
        if let Some(keyword) = &syntax.method_keyword {
            self.writer.write(keyword);
            self.writer.write(" ");
        }
        match syntax.declarations {
            DeclarationStyle::TypeFirst => {
                self.writer
                    .write(&format!("{return_type} {}({params})", method.name));
            }
            DeclarationStyle::Annotated => {
                self.writer
                    .write(&format!("{}({params}) -> {return_type}", method.name));
            }
        }
        self.write_trailing_override(method.overrides.is_some());
        self.write_suffix(form);

        let receiver = self.field_receiver(method.is_static);
        let terminator = &syntax.statement_terminator;
        let lines: Vec<String> = match &method.body {
            MethodBody::Abstract if syntax.blocks == BlockStyle::Braces => {
                self.writer.write(terminator);
                self.writer.write_line();
                return Ok(());
            }
            MethodBody::Abstract => Vec::new(),
            MethodBody::Verbatim(body) => body.lines.clone(),
            MethodBody::ReadField { field } => {
                vec![format!("return {receiver}{field}{terminator}")]
            }
            MethodBody::WriteField { field, param } => {
                vec![format!("{receiver}{field} = {param}{terminator}")]
            }
        };
        self.emit_block(&lines);
        Ok(())
    }

    fn emit_constructor(&mut self, ctor: &ConstructorDecl) -> Result<(), ConvertError> {
        let syntax = self.syntax();
        let own = ctor.signature.name.as_str();
        if ctor.is_static {
            return self.emit_static_initializer(ctor);
        }
        let params = self.render_params(&ctor.params, true, &Origin::Declared, own)?;

        if ctor.overrides.is_some()
            && let OverrideMarker::Annotation(annotation) = &syntax.override_marker
        {
            self.writer.line(annotation);
        }
        self.write_access(ctor.access);
        if let Some(keyword) = &syntax.method_keyword {
            self.writer.write(keyword);
            self.writer.write(" ");
        }
        let name = match &syntax.constructor_name {
            ConstructorName::TypeName => self.class_name.clone(),
            ConstructorName::Fixed(name) => name.clone(),
        };
        self.writer.write(&format!("{name}({params})"));
        if syntax.declarations == DeclarationStyle::Annotated
            && let Some(unit) = self.types.translate("void")
        {
            self.writer.write(&format!(" -> {unit}"));
        }
        self.write_trailing_override(ctor.overrides.is_some());
        self.emit_block(&ctor.body.lines);
        Ok(())
    }

    fn emit_static_initializer(&mut self, ctor: &ConstructorDecl) -> Result<(), ConvertError> {
        let syntax = self.syntax();
        match &syntax.static_initializer {
            StaticInitializer::Block(keyword) => {
                self.writer.write(keyword);
                self.emit_block(&ctor.body.lines);
            }
            StaticInitializer::ClassBody => {
                if ctor.body.is_empty()
                    && let BlockStyle::Indented { empty_body } = &syntax.blocks
                {
                    self.writer.line(empty_body);
                }
                for line in &ctor.body.lines {
                    self.writer.line(line);
                }
            }
            StaticInitializer::Unsupported => {
                return Err(ConvertError::unmappable_modifier(
                    &self.class_name,
                    Some(ctor.signature.name.as_str()),
                    "static",
                ));
            }
        }
        Ok(())
    }

    fn write_trailing_override(&mut self, overrides: bool) {
        if overrides && let OverrideMarker::Trailing(marker) = &self.syntax().override_marker {
            self.writer.write(" ");
            self.writer.write(marker);
        }
    }

    /// Prefix for backing-field access inside a generated accessor.
    fn field_receiver(&self, is_static: bool) -> String {
        match &self.syntax().receiver {
            Some(receiver) if !is_static => format!("{receiver}."),
            Some(_) => format!("{}.", self.class_name),
            None => String::new(),
        }
    }

    fn render_params(
        &self,
        params: &[Parameter],
        with_receiver: bool,
        origin: &Origin,
        own: &str,
    ) -> Result<String, ConvertError> {
        let syntax = self.syntax();
        let mut rendered = Vec::with_capacity(params.len() + 1);
        if with_receiver && let Some(receiver) = &syntax.receiver {
            rendered.push(receiver.clone());
        }
        for param in params {
            let ty = self.by_reference(self.translate(&param.ty, origin, own)?);
            rendered.push(match syntax.declarations {
                DeclarationStyle::TypeFirst => format!("{ty} {}", param.name),
                DeclarationStyle::Annotated => format!("{}: {ty}", param.name),
            });
        }
        Ok(rendered.join(", "))
    }

    /// Body block after a signature. Empty bodies follow the block style:
    /// bare braces, or the empty-body placeholder.
    fn emit_block(&mut self, lines: &[String]) {
        match &self.syntax().blocks {
            BlockStyle::Braces => {
                self.writer.write_line();
                self.writer.line("{");
                self.writer.increase_indent();
                for line in lines {
                    self.writer.line(line);
                }
                self.writer.decrease_indent();
                self.writer.line("}");
            }
            BlockStyle::Indented { empty_body } => {
                self.writer.line(":");
                self.writer.increase_indent();
                if lines.is_empty() {
                    self.writer.line(empty_body);
                }
                for line in lines {
                    self.writer.line(line);
                }
                self.writer.decrease_indent();
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/printer.rs"]
mod tests;
