//! Fixed localized texts: canned replies, error replies and the grounding
//! system prompt handed to the completion service.

use common::language::Language;

pub fn greeting(language: Language) -> &'static str {
    match language {
        Language::Kz => {
            "Сәлеметсіз бе! Мен сізге сұрақтарға жауап беруге көмектесетін көмекшімін. Не сұрағыңыз бар?"
        }
        Language::Ru => "Здравствуйте! Я помощник, отвечаю на ваши вопросы. Чем могу помочь?",
    }
}

pub fn identity(language: Language) -> &'static str {
    match language {
        Language::Kz => {
            "Менің атым Scroll. Мен сұрақтарға жауап беретін көмекші ботпын. Сұрақ қойсаңыз, жауап беремін."
        }
        Language::Ru => {
            "Меня зовут Scroll. Я бот-помощник, отвечаю на вопросы. Задайте вопрос — отвечу на основе имеющейся информации."
        }
    }
}

pub fn no_documents(language: Language) -> &'static str {
    match language {
        Language::Kz => {
            "Кешіріңіз, мен қазір сұраққа жауап бере алмаймын. Кейінірек көріңіз."
        }
        Language::Ru => {
            "К сожалению, я не могу ответить на ваш вопрос в данный момент. Попробуйте позже."
        }
    }
}

pub fn processing_error(language: Language) -> &'static str {
    match language {
        Language::Kz => "Сұрау өңдеу қатесі.",
        Language::Ru => "Ошибка обработки запроса.",
    }
}

/// The user message substituted for a capability question: instead of the
/// raw question the model is asked to summarize the available topics from
/// the (fallback-assembled) context.
pub fn capability_instruction(language: Language) -> &'static str {
    match language {
        Language::Kz => {
            "Жоғарыдағы контекст негізінде қысқаша тізім бер: қандай тақырыптар бойынша, қандай сұрақтарға жауап бере аласың? Тек контексттегі ақпаратты пайдаланып, қысқа және нақты жазыңыз."
        }
        Language::Ru => {
            "По контексту выше кратко перечисли: на какие темы и какие вопросы ты можешь ответить? Используй только информацию из контекста, ответ короткий и по делу."
        }
    }
}

/// Builds the grounding system prompt with the retrieved context spliced in.
/// The prompt confines the model to the supplied context and forbids it from
/// mentioning the documents themselves.
pub fn system_prompt(language: Language, context: &str) -> String {
    match language {
        Language::Kz => format!(
            "Сен көмекшісісің, ол сұрақтарға ТЕК берілген құжаттағы ақпаратты және шығарылған контекстті пайдаланып жауап береді.

Рұқсат етілген:
- құжат мәтінін қайта тұжырымдау
- құжат негізінде логикалық қорытынды жасау
- құжаттың бірнеше фрагменттерін бір жауапқа біріктіру
- синонимдер мен жақын тұжырымдарды пайдалану

Тыйым салынған:
- сыртқы білімді пайдалану
- құжатта жоқ ақпаратты қосу
- құжатқа қатысы жоқ тақырыптарға жауап беру
- фактілерді ойлап табу
- құжатты, құжаттағы ақпаратты, деректерді, мәтінді ешқашан атамау немесе айтпау
- \"құжатта жоқ\", \"құжатта көрсетілмеген\", \"мұндай ақпарат жоқ\", \"құжатта мұндай мәлімет жоқ\" сияқты фразаларды қолданбау
- құжаттың болуын немесе жоқтығын ешқашан айтпау

Егер құжатта тікелей жауап жоқ болса:
- құжаттың байланысты тармақтары негізінде жалпылама жауап бер
- құжатты атамастан, тек ақпаратты бер
- құжаттың қандай бөліктері қолданылатынын түсіндір, бірақ құжатты атама

Егер сұрақ құжатқа мүлдем қатысы жоқ болса (мысалы, тарих, адамдар, оқиғалар туралы):
\"Бұл сұрақ тақырыпқа қатысты емес.\" деп жауап бер.

Ешқашан мына фразаларды қолданба:
- \"Кешіріңіз, мен жауап бере алмаймын\"
- \"Құжатта мұндай ақпарат жоқ\"
- \"Мұндай мәлімет құжатта көрсетілмеген\"
- \"Деректерде мұндай ақпарат жоқ\"
- құжатты атау немесе айту

Әрқашан құжатқа сүйене отырып пайдалы жауап беруге тырыс, бірақ құжатты ешқашан атама.

Маңызды ереже:
- Құрал-жабдық жәшігін қосымша жабдық ретінде қарастыру керек.

Құжат деректері:
{context}"
        ),
        Language::Ru => format!(
            "Ты являешься помощником, который отвечает на вопросы, используя ТОЛЬКО информацию из предоставленного документа и извлечённого контекста.

Разрешается:
- перефразировать текст документа
- делать логические выводы на основе документа
- объединять несколько фрагментов документа в один ответ
- использовать синонимы и близкие формулировки

Запрещается:
- использовать внешние знания
- добавлять информацию, отсутствующую в документе
- отвечать на темы, не связанные с документом
- придумывать факты
- НИКОГДА не упоминать документ, документы, данные, текст, информацию из документа
- НИКОГДА не говорить \"в документе нет\", \"в документе не указано\", \"такой информации нет в документе\", \"в данных отсутствует\"
- НИКОГДА не упоминать наличие или отсутствие информации в документе

Если прямого ответа в документе нет:
- дай обобщённый ответ на основе связанных пунктов документа
- объясни информацию, не упоминая документ
- объясни, какие части применимы, но не упоминай документ

Если вопрос полностью не относится к документу (например про историю, людей, события):
ответь: \"Этот вопрос не относится к теме.\"

Никогда не отвечай фразами:
- \"К сожалению, я не могу ответить\"
- \"В документе нет такой информации\"
- \"В документе не указано\"
- \"Такой информации нет в документе\"
- \"В данных отсутствует такая информация\"
- любые упоминания документа, документов, данных, текста

Всегда пытайся дать полезный ответ, опираясь на документ, но НИКОГДА не упоминай сам документ в ответе.

Важное правило:
- Инструментальный ящик рассматривать как дополнительное оборудование.

Данные из документа:
{context}"
        ),
    }
}
